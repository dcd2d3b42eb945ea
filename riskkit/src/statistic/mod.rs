//! Statistic 统计模块
//!
//! 本模块提供了用于分析收益率序列的统计算法和风险指标。
//!
//! # 核心概念
//!
//! - **algorithm**: 用于分析数据集的统计算法（Welford Online、中心矩）
//! - **metric**: 风险指标（回撤、半标准差、偏度、峰度、正态性检验、历史 VaR）
//! - **summary**: 汇总所有风险指标的风险摘要

/// 用于分析数据集的统计算法。
pub mod algorithm;

/// 风险指标的计算逻辑。
pub mod metric;

/// 收益率序列与收益率表的风险摘要。
///
/// 例如，`RiskSummary`、`RiskSummaryTable`、`RiskSummaryGenerator` 等。
pub mod summary;
