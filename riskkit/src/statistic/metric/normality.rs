//! Normality 正态性检验模块
//!
//! 本模块提供了 Jarque–Bera 正态性检验。检验统计量只依赖样本的偏度和峰度，
//! 在正态性原假设下渐近服从自由度为 2 的卡方分布。
//!
//! # 计算公式
//!
//! `JB = n / 6 × (S² + (K - 3)² / 4)`
//!
//! 其中 `S` 为偏度，`K` 为原始峰度，`n` 为非缺失观测值数量。
//! p 值为 `χ²(2)` 在 `JB` 处的生存函数。

use crate::{error::RiskError, statistic::algorithm::Moments};
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::debug;

/// Jarque–Bera 检验所需的最少非缺失观测值数量。
pub const MIN_OBSERVATIONS: usize = 2;

/// Jarque–Bera 检验结果。
///
/// 样本方差为零时 `statistic` 与 `p_value` 都为 `NaN`，此时 [`JarqueBera::is_normal`]
/// 对任何水平都返回 `false`。
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct JarqueBera {
    /// 检验统计量 `JB`。
    pub statistic: f64,
    /// `χ²(2)` 下的 p 值。
    pub p_value: f64,
}

impl JarqueBera {
    /// 对 `values` 中的非缺失值执行 Jarque–Bera 检验。
    ///
    /// # 错误
    ///
    /// - 非缺失观测值少于 2 个：[`RiskError::InsufficientData`]
    pub fn calculate(values: &[f64]) -> Result<Self, RiskError> {
        let moments = Moments::calculate(values);
        if moments.count < MIN_OBSERVATIONS {
            return Err(RiskError::insufficient_data(
                "jarque_bera",
                moments.count,
                MIN_OBSERVATIONS,
            ));
        }

        let skewness = moments.skewness();
        let excess_kurtosis = moments.kurtosis() - 3.0;
        let statistic = moments.count as f64 / 6.0
            * (skewness.powi(2) + excess_kurtosis.powi(2) / 4.0);

        if statistic.is_nan() {
            debug!(
                observations = moments.count,
                "zero variance sample, Jarque-Bera statistic is NaN"
            );
            return Ok(Self::new(f64::NAN, f64::NAN));
        }

        let chi_squared =
            ChiSquared::new(2.0).map_err(|error| RiskError::Distribution(error.to_string()))?;

        Ok(Self::new(statistic, chi_squared.sf(statistic)))
    }

    /// p 值是否严格大于显著性水平 `level`（即无法拒绝正态性）。
    pub fn is_normal(&self, level: f64) -> bool {
        self.p_value > level
    }
}

/// 对 `returns` 执行 Jarque–Bera 检验，参见 [`JarqueBera::calculate`]。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::{error::RiskError, statistic::metric::normality::jarque_bera};
///
/// let result = jarque_bera(&[-0.02, -0.01, 0.0, 0.01, 0.02]).unwrap();
/// assert!(result.p_value > 0.0 && result.p_value <= 1.0);
///
/// assert!(matches!(
///     jarque_bera(&[0.01]),
///     Err(RiskError::InsufficientData { .. })
/// ));
/// ```
pub fn jarque_bera(returns: &[f64]) -> Result<JarqueBera, RiskError> {
    JarqueBera::calculate(returns)
}

/// 在显著性水平 `level`（开区间 `(0, 1)`）下，`returns` 是否无法拒绝正态性。
///
/// 当且仅当 Jarque–Bera p 值严格大于 `level` 时返回 `true`。常用水平为 `0.01`。
///
/// # 错误
///
/// - `level` 不在 `(0, 1)` 内：[`RiskError::InvalidLevel`]
/// - 非缺失观测值少于 2 个：[`RiskError::InsufficientData`]
pub fn is_normal(returns: &[f64], level: f64) -> Result<bool, RiskError> {
    if !(level > 0.0 && level < 1.0) {
        return Err(RiskError::invalid_level("normality", level, "(0, 1)"));
    }

    JarqueBera::calculate(returns).map(|result| result.is_normal(level))
}
