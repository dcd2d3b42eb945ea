//! Logging 日志模块
//!
//! 提供 RiskKit 的默认 Tracing 日志初始化器。
//!
//! 日志级别通过 `RUST_LOG` 环境变量配置，默认为 `INFO`。

use tracing_subscriber::{Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// 初始化默认的 RiskKit 人类可读格式 Tracing 日志。
///
/// # 使用示例
///
/// ```rust,ignore
/// riskkit::logging::init_logging();
/// tracing::info!("loading returns");
/// ```
pub fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(env_filter()),
        )
        .init()
}

/// 初始化默认的 RiskKit JSON 格式 Tracing 日志。
///
/// 适用于由日志收集系统消费输出的场景。
pub fn init_json_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .flatten_event(true)
                .with_filter(env_filter()),
        )
        .init()
}

fn env_filter() -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
        .from_env_lossy()
}
