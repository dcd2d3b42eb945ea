//! Moment 矩统计模块
//!
//! 本模块提供了 Skewness（偏度）与 Kurtosis（峰度）的计算逻辑，二者都使用
//! **总体**标准差（分母为 `n`）。
//!
//! # 计算公式
//!
//! - `skewness = mean((r - μ)³) / σ³`
//! - `kurtosis = mean((r - μ)⁴) / σ⁴`
//!
//! 注意：[`kurtosis`] 是原始的四阶标准化矩，**不是**超额峰度，正态分布的值约为 3。
//! 需要超额峰度时使用 [`excess_kurtosis`]。

use crate::statistic::algorithm::Moments;
use tracing::debug;

/// 计算 `returns` 的总体偏度。
///
/// 缺失值（`NaN`）被忽略。没有观测值或方差为零时返回 `NaN`。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::statistic::metric::moment::skewness;
///
/// assert!(skewness(&[-0.02, -0.01, 0.0, 0.01, 0.02]).abs() < 1e-12);
/// assert!(skewness(&[0.01, 0.01, 0.01]).is_nan());
/// ```
pub fn skewness(returns: &[f64]) -> f64 {
    let moments = Moments::calculate(returns);
    log_degenerate(&moments, "skewness");
    moments.skewness()
}

/// 计算 `returns` 的原始（非超额）峰度。
///
/// 缺失值（`NaN`）被忽略。没有观测值或方差为零时返回 `NaN`。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::statistic::metric::moment::kurtosis;
///
/// let kurtosis = kurtosis(&[-0.02, 0.02, -0.02, 0.02]);
/// assert!((kurtosis - 1.0).abs() < 1e-12);
/// ```
pub fn kurtosis(returns: &[f64]) -> f64 {
    let moments = Moments::calculate(returns);
    log_degenerate(&moments, "kurtosis");
    moments.kurtosis()
}

/// 计算 `returns` 的超额峰度（`kurtosis - 3`），正态分布的值约为 0。
pub fn excess_kurtosis(returns: &[f64]) -> f64 {
    kurtosis(returns) - 3.0
}

fn log_degenerate(moments: &Moments, statistic: &'static str) {
    if moments.count == 0 || moments.population_variance() == 0.0 {
        debug!(
            statistic,
            observations = moments.count,
            "zero variance or no observations, standardised moment is NaN"
        );
    }
}
