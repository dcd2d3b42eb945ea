//! Metric 风险指标模块
//!
//! 本模块提供了各种风险指标的计算逻辑。每个指标都有一个作用于 `&[f64]` 的核心函数，
//! 并由 [`ReturnSeries`](crate::returns::ReturnSeries)、[`ReturnTable`](crate::returns::ReturnTable)
//! 和 [`Returns`](crate::returns::Returns) 按形状分派。
//!
//! # 核心指标
//!
//! - **Drawdown**: 回撤表（财富指数、历史峰值、回撤百分比）与最大回撤
//! - **Semideviation**: 半标准差，只考虑负收益
//! - **Moment**: 偏度与原始峰度
//! - **Normality**: Jarque–Bera 正态性检验
//! - **VaR**: 历史 Value-at-Risk

/// Drawdown 回撤计算逻辑。
pub mod drawdown;

/// Semideviation 半标准差计算逻辑。
pub mod semideviation;

/// Skewness 偏度与 Kurtosis 峰度计算逻辑。
pub mod moment;

/// Jarque–Bera 正态性检验。
pub mod normality;

/// 历史 Value-at-Risk 计算逻辑。
pub mod var;
