//! Semideviation 半标准差模块
//!
//! 半标准差（负半标准差）是只使用低于目标（此处为 0）的观测值计算的总体标准差，
//! 是 Sortino Ratio 等下行风险指标的分母。
//!
//! # 计算公式
//!
//! `semideviation = std_dev_population({ r | r < 0 })`

use crate::statistic::algorithm::Moments;

/// 计算 `returns` 中严格小于 0 的值的总体标准差（分母为其数量）。
///
/// 缺失值（`NaN`）被忽略。
///
/// ## 特殊情况
///
/// 没有负收益（包括空输入）时没有下行波动，返回 `0.0`。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::statistic::metric::semideviation::semideviation;
///
/// assert_eq!(semideviation(&[0.01, 0.02, 0.0]), 0.0);
/// assert!((semideviation(&[0.05, -0.01, -0.03]) - 0.01).abs() < 1e-12);
/// ```
pub fn semideviation(returns: &[f64]) -> f64 {
    let losses = returns
        .iter()
        .copied()
        .filter(|value| *value < 0.0)
        .collect::<Vec<_>>();

    if losses.is_empty() {
        return 0.0;
    }

    Moments::calculate(&losses).population_std_dev()
}
