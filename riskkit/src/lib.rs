#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms,
    rust_2024_compatibility
)]
#![allow(clippy::type_complexity, type_alias_bounds)]

//! # RiskKit
//! RiskKit 是一个用于计算金融收益率序列描述性风险统计量的 Rust 库。
//! * **纯函数**：每个统计量都是对数值序列的无状态、同步变换。
//! * **强类型**：单个序列与按列命名的表格使用显式的和类型（[`Returns`](returns::Returns)）区分，
//!   而不是运行时形状判断。
//! * **明确的边界情况**：零方差、空负收益子集、-100% 收益等退化输入都有文档化的确定输出。
//!
//! ## 概述
//! 从高层次来看，它提供了几个主要组件：
//! * 月度周期索引的收益率序列 [`ReturnSeries`](returns::ReturnSeries) 与收益率表
//!   [`ReturnTable`](returns::ReturnTable)。
//! * Drawdown（回撤）表：财富指数、历史峰值与回撤百分比。
//! * 矩统计量：Semideviation（下半标准差）、Skewness（偏度）、Kurtosis（峰度，非超额）。
//! * Jarque–Bera 正态性检验。
//! * 历史 Value-at-Risk（风险价值）。
//! * 汇总以上所有指标的 [`RiskSummary`](statistic::summary::RiskSummary)。
//!
//! ## 快速开始
//! ```rust
//! use riskkit::returns::ReturnSeries;
//!
//! let series = ReturnSeries::from_values(vec![-0.05, -0.03, -0.01, 0.02, 0.04]);
//!
//! let var = series.var_historic(20.0).unwrap();
//! assert!((var - 0.034).abs() < 1e-12);
//!
//! let drawdown = series.drawdown();
//! assert_eq!(drawdown.len(), 5);
//! ```

use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// 定义 RiskKit 中所有可能的错误。
pub mod error;

/// 提供 RiskKit 的默认 Tracing 日志初始化器。
pub mod logging;

/// 风险统计的可序列化配置（初始财富、VaR 水平、正态性检验显著性水平）。
pub mod config;

/// 收益率数据模型。
///
/// 例如：`MonthlyPeriod`、`ReturnSeries`、`ReturnTable`、`Returns` 等。
pub mod returns;

/// 用于分析收益率序列的统计算法、风险指标和风险摘要。
///
/// 例如：`DrawdownTable`、`JarqueBera`、`RiskSummary` 等。
pub mod statistic;

/// 带周期标签的值。
///
/// 用于将任意值与其所在的周期标签（例如月度周期或位置索引）关联。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::Labelled;
///
/// let point = Labelled::new(1100.0, 3usize);
/// assert_eq!(point.label, 3);
/// ```
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Default,
    Deserialize,
    Serialize,
    Constructor,
)]
pub struct Labelled<T, Label> {
    /// 存储的值
    pub value: T,
    /// 周期标签
    pub label: Label,
}

/// RiskKit 测试工具。
///
/// 提供用于测试的辅助函数，包括浮点数比较和确定性的分布样本生成。
pub mod test_utils {
    use statrs::distribution::{ContinuousCDF, Normal};

    /// 比较两个 f64 浮点数是否相等（考虑 NaN 和无穷大）。
    ///
    /// # 特殊情况处理
    ///
    /// - 两个 NaN 值被视为相等
    /// - 两个同符号的无穷大值被视为相等
    /// - 其他包含 NaN 或无穷大的情况返回 `false`
    ///
    /// # 使用示例
    ///
    /// ```rust
    /// use riskkit::test_utils::f64_is_eq;
    ///
    /// assert!(f64_is_eq(0.1 + 0.2, 0.3, 1e-10));
    /// assert!(f64_is_eq(f64::NAN, f64::NAN, 1e-10));
    /// ```
    pub fn f64_is_eq(actual: f64, expected: f64, epsilon: f64) -> bool {
        if actual.is_nan() && expected.is_nan() {
            true
        } else if actual.is_infinite() && expected.is_infinite() {
            actual.is_sign_positive() == expected.is_sign_positive()
        } else if actual.is_nan()
            || expected.is_nan()
            || actual.is_infinite()
            || expected.is_infinite()
        {
            false
        } else {
            (actual - expected).abs() < epsilon
        }
    }

    /// 生成 `n` 个标准正态分布的确定性样本。
    ///
    /// 第 `i` 个样本是标准正态分布在 `(i + 0.5) / n` 处的分位数，因此样本是对称的，
    /// 偏度约为 0，峰度随 `n` 增大趋近于 3。
    pub fn normal_quantiles(n: usize) -> Vec<f64> {
        let normal = Normal::standard();
        (0..n)
            .map(|i| normal.inverse_cdf((i as f64 + 0.5) / n as f64))
            .collect()
    }

    /// 生成 `n` 个对数正态分布的确定性样本（强右偏、厚尾）。
    pub fn lognormal_quantiles(n: usize) -> Vec<f64> {
        normal_quantiles(n).into_iter().map(f64::exp).collect()
    }
}
