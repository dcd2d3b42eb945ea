//! Error 错误处理模块
//!
//! 本模块定义了 RiskKit 统计计算可能遇到的所有错误类型。
//!
//! 注意：退化的数值输入（零方差、没有负收益、财富归零）**不是**错误，
//! 它们产生文档化的确定输出（`0.0` 或 `NaN`），详见各指标模块。

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use thiserror::Error;

/// 表示 RiskKit 统计计算可能遇到的所有错误。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::{error::RiskError, returns::ReturnSeries};
///
/// let series = ReturnSeries::from_values(vec![0.01, -0.02]);
///
/// assert!(matches!(
///     series.var_historic(120.0),
///     Err(RiskError::InvalidLevel { .. })
/// ));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Error)]
pub enum RiskError {
    /// 收益率序列的索引与值的长度不一致。
    #[error("ReturnSeries index length {index} does not match values length {values}")]
    LengthMismatch {
        /// 索引长度
        index: usize,
        /// 值长度
        values: usize,
    },

    /// 无法解析的周期标签。
    #[error("invalid period label {label:?}: expected {expected}")]
    InvalidPeriod {
        /// 原始标签
        label: SmolStr,
        /// 期望的格式描述
        expected: SmolStr,
    },

    /// 输入既不是收益率序列也不是收益率表。
    #[error("unsupported input: expected {expected}, found {found}")]
    UnsupportedInput {
        /// 期望的输入形状
        expected: SmolStr,
        /// 实际的输入形状
        found: SmolStr,
    },

    /// 水平参数（VaR 百分位或显著性水平）超出有效范围。
    #[error("invalid {name} level {value}: expected a value in {range}")]
    InvalidLevel {
        /// 参数名称
        name: SmolStr,
        /// 提供的值
        value: f64,
        /// 有效范围描述
        range: SmolStr,
    },

    /// 非缺失观测值数量不足以计算该统计量。
    #[error("insufficient data for {statistic}: {observations} observations, at least {required} required")]
    InsufficientData {
        /// 统计量名称
        statistic: SmolStr,
        /// 可用的非缺失观测值数量
        observations: usize,
        /// 所需的最少观测值数量
        required: usize,
    },

    /// 概率分布构造失败。
    #[error("distribution error: {0}")]
    Distribution(String),

    /// 配置无效或无法加载。
    #[error("config error: {0}")]
    Config(String),
}

impl RiskError {
    /// 构造 [`RiskError::InvalidLevel`]。
    pub(crate) fn invalid_level(name: &str, value: f64, range: &str) -> Self {
        Self::InvalidLevel {
            name: SmolStr::new(name),
            value,
            range: SmolStr::new(range),
        }
    }

    /// 构造 [`RiskError::InsufficientData`]。
    pub(crate) fn insufficient_data(statistic: &str, observations: usize, required: usize) -> Self {
        Self::InsufficientData {
            statistic: SmolStr::new(statistic),
            observations,
            required,
        }
    }
}
