//! Summary 风险摘要模块
//!
//! 本模块把所有风险指标汇总为单个序列的 [`RiskSummary`] 或按列的 [`RiskSummaryTable`]，
//! 并以表格形式（`prettytable-rs`）显示。
//!
//! 对某列计算失败的统计量（例如观测值不足）保存为 `None`、显示为 `n/a`，并以 `warn!` 记录。

use crate::{
    config::RiskConfig,
    error::RiskError,
    returns::{ColumnMap, ReturnSeries, ReturnTable},
    statistic::{
        algorithm::Moments,
        metric::{drawdown::max::MaxDrawdown, normality::JarqueBera},
    },
};
use derive_more::Constructor;
use prettytable::{Cell, Row, Table, row};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

const NOT_AVAILABLE: &str = "n/a";

/// 单个收益率序列的风险摘要。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct RiskSummary<Index> {
    /// 非缺失观测值数量。
    pub observations: usize,
    /// 平均收益率。
    pub mean: f64,
    /// 半标准差。
    pub semideviation: f64,
    /// 偏度。
    pub skewness: f64,
    /// 原始峰度。
    pub kurtosis: f64,
    /// Jarque–Bera 检验结果。
    pub jarque_bera: Option<JarqueBera>,
    /// 在配置的显著性水平下是否无法拒绝正态性。
    pub is_normal: Option<bool>,
    /// 配置的百分位水平下的历史 VaR。
    pub var_historic: Option<f64>,
    /// 最大回撤。
    pub max_drawdown: Option<MaxDrawdown<Index>>,
}

/// 收益率表每列的 [`RiskSummary`]，保持列顺序。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct RiskSummaryTable<Index> {
    /// 列名到风险摘要的映射。
    pub columns: ColumnMap<RiskSummary<Index>>,
}

/// [`RiskSummary`] 生成器，由 [`RiskConfig`] 配置。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::{
///     config::RiskConfig,
///     returns::ReturnSeries,
///     statistic::summary::RiskSummaryGenerator,
/// };
///
/// let generator = RiskSummaryGenerator::new(RiskConfig::default()).unwrap();
/// let summary = generator.generate(&ReturnSeries::from_values(vec![0.1, -0.2, -0.05, 0.2, 0.15, -0.17]));
///
/// assert_eq!(summary.observations, 6);
/// assert!(summary.var_historic.is_some());
/// println!("{summary}");
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct RiskSummaryGenerator {
    config: RiskConfig,
}

impl RiskSummaryGenerator {
    /// 使用经过 [`RiskConfig::validate`] 校验的配置构造生成器。
    ///
    /// # 错误
    ///
    /// - 配置值超出有效范围：[`RiskError::InvalidLevel`] 或 [`RiskError::Config`]
    pub fn new(config: RiskConfig) -> Result<Self, RiskError> {
        config.validate().map(|config| Self { config })
    }

    /// 风险统计配置。
    pub fn config(&self) -> &RiskConfig {
        &self.config
    }

    /// 生成单个序列的 [`RiskSummary`]。
    pub fn generate<Index>(&self, series: &ReturnSeries<Index>) -> RiskSummary<Index>
    where
        Index: Clone,
    {
        self.summarise("series", series)
    }

    /// 生成收益率表每列的 [`RiskSummaryTable`]。
    pub fn generate_table<Index>(&self, table: &ReturnTable<Index>) -> RiskSummaryTable<Index>
    where
        Index: Clone,
    {
        RiskSummaryTable {
            columns: table
                .iter()
                .map(|(name, series)| (name.clone(), self.summarise(name, series)))
                .collect(),
        }
    }

    fn summarise<Index>(&self, column: &str, series: &ReturnSeries<Index>) -> RiskSummary<Index>
    where
        Index: Clone,
    {
        let moments = Moments::calculate(series.values());
        let jarque_bera = ok_or_warn(column, "jarque_bera", series.jarque_bera());

        RiskSummary {
            observations: moments.count,
            mean: moments.mean,
            semideviation: series.semideviation(),
            skewness: series.skewness(),
            kurtosis: series.kurtosis(),
            jarque_bera,
            is_normal: jarque_bera.map(|result| result.is_normal(self.config.normality_level)),
            var_historic: ok_or_warn(
                column,
                "var_historic",
                series.var_historic(self.config.var_level),
            ),
            max_drawdown: series
                .drawdown_from(self.config.initial_wealth)
                .max_drawdown(),
        }
    }
}

fn ok_or_warn<T>(column: &str, statistic: &'static str, result: Result<T, RiskError>) -> Option<T> {
    result
        .inspect_err(|error| warn!(column, statistic, %error, "statistic unavailable"))
        .ok()
}

impl<Index> RiskSummary<Index>
where
    Index: fmt::Display,
{
    /// 以 `Metric | Value` 两列的 [`Table`] 表示。
    pub fn table(&self) -> Table {
        let mut table = Table::new();
        table.set_titles(row!["Metric", "Value"]);
        for (metric, value) in METRICS.iter().zip(self.cells()) {
            table.add_row(Row::new(vec![Cell::new(metric), Cell::new(&value)]));
        }
        table
    }

    /// 打印到标准输出。
    pub fn printstd(&self) {
        self.table().printstd();
    }

    fn cells(&self) -> [String; 9] {
        [
            self.observations.to_string(),
            format_f64(self.mean),
            format_f64(self.semideviation),
            format_f64(self.skewness),
            format_f64(self.kurtosis),
            format_option(self.jarque_bera.map(|result| format_f64(result.p_value))),
            format_option(self.is_normal.map(|normal| normal.to_string())),
            format_option(self.var_historic.map(format_f64)),
            format_option(self.max_drawdown.as_ref().map(|max| {
                format!("{} ({} to {})", format_f64(max.value()), max.peak(), max.trough())
            })),
        ]
    }
}

impl<Index> RiskSummaryTable<Index>
where
    Index: fmt::Display,
{
    /// 以 `Metric | <列名>...` 的 [`Table`] 表示，每行一个指标。
    pub fn table(&self) -> Table {
        let mut table = Table::new();

        let titles = std::iter::once(Cell::new("Metric"))
            .chain(self.columns.keys().map(|name| Cell::new(name)))
            .collect();
        table.set_titles(Row::new(titles));

        let cells = self
            .columns
            .values()
            .map(RiskSummary::cells)
            .collect::<Vec<_>>();

        for (position, metric) in METRICS.iter().enumerate() {
            let row = std::iter::once(Cell::new(metric))
                .chain(cells.iter().map(|column| Cell::new(&column[position])))
                .collect();
            table.add_row(Row::new(row));
        }

        table
    }

    /// 打印到标准输出。
    pub fn printstd(&self) {
        self.table().printstd();
    }
}

const METRICS: [&str; 9] = [
    "Observations",
    "Mean",
    "Semideviation",
    "Skewness",
    "Kurtosis",
    "Jarque-Bera p-value",
    "Is Normal",
    "Historic VaR",
    "Max Drawdown",
];

impl<Index> fmt::Display for RiskSummary<Index>
where
    Index: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

impl<Index> fmt::Display for RiskSummaryTable<Index>
where
    Index: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table())
    }
}

fn format_f64(value: f64) -> String {
    format!("{value:.6}")
}

fn format_option(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_string())
}
