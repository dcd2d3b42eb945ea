//! Historic VaR 历史风险价值模块
//!
//! 历史 Value-at-Risk 是收益率经验分布在给定百分位处的值，取反后报告为正数的损失幅度。
//! 例如 `level = 5` 表示：有 5% 的收益率低于 `-VaR`，其余 95% 高于它。
//!
//! # 计算公式
//!
//! `VaR(level) = -percentile(returns, level)`
//!
//! 百分位使用顺序统计量之间的线性插值：`rank = level / 100 × (n - 1)`。

use crate::{
    error::RiskError,
    returns::{Returns, Statistic},
};
use itertools::Itertools;

/// 计算 `values` 在百分位 `level`（`[0, 100]`）处的值，在顺序统计量之间线性插值。
///
/// 缺失值（`NaN`）被忽略。
///
/// # 错误
///
/// - `level` 超出 `[0, 100]` 或为 `NaN`：[`RiskError::InvalidLevel`]
/// - 没有非缺失观测值：[`RiskError::InsufficientData`]
///
/// # 使用示例
///
/// ```rust
/// use riskkit::statistic::metric::var::percentile;
///
/// let values = [4.0, 1.0, 3.0, 2.0];
/// assert_eq!(percentile(&values, 50.0).unwrap(), 2.5);
/// assert_eq!(percentile(&values, 100.0).unwrap(), 4.0);
/// ```
pub fn percentile(values: &[f64], level: f64) -> Result<f64, RiskError> {
    if !(0.0..=100.0).contains(&level) {
        return Err(RiskError::invalid_level("percentile", level, "[0, 100]"));
    }

    let sorted = values
        .iter()
        .copied()
        .filter(|value| !value.is_nan())
        .sorted_by(f64::total_cmp)
        .collect_vec();

    if sorted.is_empty() {
        return Err(RiskError::insufficient_data("percentile", 0, 1));
    }

    let rank = level / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    Ok(lerp(sorted[lower], sorted[upper], rank - lower as f64))
}

/// 历史 VaR：`-percentile(returns, level)`，以正数报告损失幅度。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::statistic::metric::var::var_historic;
///
/// let returns = [-0.05, -0.03, -0.01, 0.02, 0.04];
/// let var = var_historic(&returns, 20.0).unwrap();
///
/// assert!((var - 0.034).abs() < 1e-12);
/// ```
pub fn var_historic(returns: &[f64], level: f64) -> Result<f64, RiskError> {
    percentile(returns, level).map(|value| -value)
}

/// 对动态 JSON 输入计算历史 VaR。
///
/// 数字数组按序列计算并返回标量；值为数字数组的对象按列计算。其他任何输入
/// （例如单个数字）立即返回 [`RiskError::UnsupportedInput`]，不产生部分结果。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::{error::RiskError, statistic::metric::var::var_historic_value};
/// use serde_json::json;
///
/// let var = var_historic_value(json!({ "A": [-0.05, 0.01], "B": [-0.02, 0.03] }), 5.0).unwrap();
/// assert!(var.column("A").is_some());
///
/// assert!(matches!(
///     var_historic_value(json!(0.05), 5.0),
///     Err(RiskError::UnsupportedInput { .. })
/// ));
/// ```
pub fn var_historic_value(value: serde_json::Value, level: f64) -> Result<Statistic, RiskError> {
    Returns::try_from(value)?.var_historic(level)
}

// 与 numpy 的 `_lerp` 一致：t >= 0.5 时从上端插值，减少舍入误差
fn lerp(lower: f64, upper: f64, weight: f64) -> f64 {
    let difference = upper - lower;
    if weight >= 0.5 {
        upper - difference * (1.0 - weight)
    } else {
        lower + difference * weight
    }
}
