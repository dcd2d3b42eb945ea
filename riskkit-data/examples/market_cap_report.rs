use riskkit::{
    config::RiskConfig, logging::init_json_logging, statistic::summary::RiskSummaryGenerator,
};
use riskkit_data::loader::market_cap::{LARGE_CAP, SMALL_CAP, load_market_cap_returns};
use tracing::info;

/// 市值十分位收益率样本文件路径。
const FILE_PATH_MARKET_CAP: &str = "riskkit-data/examples/data/market_cap_sample.csv";

/// 示例：加载市值十分位收益率并打印风险摘要。
fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化 JSON 格式日志追踪
    init_json_logging();

    // 可通过第一个参数指定文件路径
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| FILE_PATH_MARKET_CAP.to_string());

    let returns = load_market_cap_returns(&path)?;

    for name in [SMALL_CAP, LARGE_CAP] {
        if let Some(series) = returns.column(name) {
            info!(
                %name,
                observations = series.count(),
                var = ?series.var_historic(5.0),
                is_normal = ?series.is_normal(0.01),
                "column loaded"
            );
        }
    }

    RiskSummaryGenerator::new(RiskConfig::default())?
        .generate_table(&returns)
        .printstd();

    Ok(())
}
