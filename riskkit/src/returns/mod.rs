//! Returns 收益率数据模型模块
//!
//! # 核心概念
//!
//! - **ReturnSeries**: 带周期索引的有序收益率序列（0.01 表示 1%）
//! - **ReturnTable**: 按列名（资产标识）组织的收益率序列集合，保持插入顺序
//! - **Returns**: 序列或表格的和类型，每个统计量对两种形状都有确定的输出形状
//! - **Statistic**: 标量（序列）或按列映射（表格）的统计结果
//!
//! `NaN` 表示缺失的观测值（例如数据文件中的 `-99.99` 哨兵值）。

use crate::{
    Labelled,
    error::RiskError,
    statistic::metric::{
        drawdown::DrawdownTable,
        moment::{excess_kurtosis, kurtosis, skewness},
        normality::{JarqueBera, is_normal, jarque_bera},
        semideviation::semideviation,
        var::var_historic,
    },
};
use derive_more::From;
use fnv::FnvBuildHasher;
use indexmap::IndexMap;
use period::MonthlyPeriod;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// 月度周期标签。
pub mod period;

/// 基于 [`FnvBuildHasher`] 的保序哈希表。
pub type FnvIndexMap<K, V> = IndexMap<K, V, FnvBuildHasher>;

/// 列名到值的保序映射。
pub type ColumnMap<T> = FnvIndexMap<SmolStr, T>;

/// 带周期索引的有序收益率序列。
///
/// 索引与值的长度始终相等。标签不要求唯一，统计量只依赖值的顺序。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::returns::{ReturnSeries, period::MonthlyPeriod};
///
/// let january = MonthlyPeriod::new(2020, 1).unwrap();
/// let series = ReturnSeries::new(
///     vec![january, january.next()],
///     vec![0.01, -0.02],
/// )
/// .unwrap();
///
/// assert_eq!(series.len(), 2);
/// assert_eq!(series.values(), &[0.01, -0.02]);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ReturnSeries<Index = MonthlyPeriod> {
    index: Vec<Index>,
    values: Vec<f64>,
}

impl ReturnSeries<usize> {
    /// 使用位置索引（`0..n`）构造 [`ReturnSeries`]。
    pub fn from_values(values: Vec<f64>) -> Self {
        Self {
            index: (0..values.len()).collect(),
            values,
        }
    }
}

impl<Index> Default for ReturnSeries<Index> {
    fn default() -> Self {
        Self {
            index: Vec::new(),
            values: Vec::new(),
        }
    }
}

impl<Index> ReturnSeries<Index> {
    /// 构造 [`ReturnSeries`]，索引与值长度不一致时返回 [`RiskError::LengthMismatch`]。
    pub fn new(index: Vec<Index>, values: Vec<f64>) -> Result<Self, RiskError> {
        if index.len() != values.len() {
            return Err(RiskError::LengthMismatch {
                index: index.len(),
                values: values.len(),
            });
        }

        Ok(Self { index, values })
    }

    /// 周期索引。
    pub fn index(&self) -> &[Index] {
        &self.index
    }

    /// 收益率值。
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// 观测值数量（包括缺失值）。
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// 是否没有观测值。
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 非缺失观测值数量。
    pub fn count(&self) -> usize {
        self.values.iter().filter(|value| !value.is_nan()).count()
    }

    /// 按顺序迭代带标签的观测值。
    pub fn iter(&self) -> impl Iterator<Item = Labelled<f64, &Index>> + '_ {
        self.index
            .iter()
            .zip(self.values.iter())
            .map(|(label, value)| Labelled::new(*value, label))
    }

    /// 以默认初始财富（1000）计算 [`DrawdownTable`]。
    pub fn drawdown(&self) -> DrawdownTable<Index>
    where
        Index: Clone,
    {
        DrawdownTable::calculate(self)
    }

    /// 以给定初始财富计算 [`DrawdownTable`]。
    pub fn drawdown_from(&self, initial_wealth: f64) -> DrawdownTable<Index>
    where
        Index: Clone,
    {
        DrawdownTable::calculate_from(self, initial_wealth)
    }

    /// 负收益的总体标准差，参见 [`semideviation`]。
    pub fn semideviation(&self) -> f64 {
        semideviation(&self.values)
    }

    /// 总体偏度，参见 [`skewness`]。
    pub fn skewness(&self) -> f64 {
        skewness(&self.values)
    }

    /// 原始（非超额）峰度，参见 [`kurtosis`]。
    pub fn kurtosis(&self) -> f64 {
        kurtosis(&self.values)
    }

    /// 超额峰度（`kurtosis - 3`），参见 [`excess_kurtosis`]。
    pub fn excess_kurtosis(&self) -> f64 {
        excess_kurtosis(&self.values)
    }

    /// Jarque–Bera 检验统计量与 p 值，参见 [`jarque_bera`]。
    pub fn jarque_bera(&self) -> Result<JarqueBera, RiskError> {
        jarque_bera(&self.values)
    }

    /// 在显著性水平 `level` 下是否无法拒绝正态性，参见 [`is_normal`]。
    pub fn is_normal(&self, level: f64) -> Result<bool, RiskError> {
        is_normal(&self.values, level)
    }

    /// 百分位 `level` 处的历史 VaR，参见 [`var_historic`]。
    pub fn var_historic(&self, level: f64) -> Result<f64, RiskError> {
        var_historic(&self.values, level)
    }
}

impl<Index> FromIterator<(Index, f64)> for ReturnSeries<Index> {
    fn from_iter<Iter>(iter: Iter) -> Self
    where
        Iter: IntoIterator<Item = (Index, f64)>,
    {
        let (index, values) = iter.into_iter().unzip();
        Self { index, values }
    }
}

/// 按列名组织的收益率序列集合，保持列的插入顺序。
///
/// 每列独立计算统计量，各列索引不要求相同。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::returns::{ReturnSeries, ReturnTable};
///
/// let table = ReturnTable::from_iter([
///     ("SmallCap", ReturnSeries::from_values(vec![0.02, -0.04, 0.01])),
///     ("LargeCap", ReturnSeries::from_values(vec![0.01, -0.01, 0.00])),
/// ]);
///
/// let semideviation = table.semideviation();
/// assert_eq!(semideviation.keys().collect::<Vec<_>>(), ["SmallCap", "LargeCap"]);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ReturnTable<Index = MonthlyPeriod> {
    columns: ColumnMap<ReturnSeries<Index>>,
}

impl<Index> Default for ReturnTable<Index> {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
        }
    }
}

impl<Index> ReturnTable<Index> {
    /// 插入一列，若列名已存在则替换并返回旧列。
    pub fn insert<S>(&mut self, name: S, series: ReturnSeries<Index>) -> Option<ReturnSeries<Index>>
    where
        S: Into<SmolStr>,
    {
        self.columns.insert(name.into(), series)
    }

    /// 按列名查找。
    pub fn column(&self, name: &str) -> Option<&ReturnSeries<Index>> {
        self.columns.get(name)
    }

    /// 按插入顺序迭代列名。
    pub fn names(&self) -> impl Iterator<Item = &SmolStr> + '_ {
        self.columns.keys()
    }

    /// 按插入顺序迭代 `(列名, 序列)`。
    pub fn iter(&self) -> impl Iterator<Item = (&SmolStr, &ReturnSeries<Index>)> + '_ {
        self.columns.iter()
    }

    /// 列数。
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// 是否没有列。
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// 对每列应用 `f`。
    pub fn map_columns<T, F>(&self, f: F) -> ColumnMap<T>
    where
        F: Fn(&ReturnSeries<Index>) -> T,
    {
        self.columns
            .iter()
            .map(|(name, series)| (name.clone(), f(series)))
            .collect()
    }

    /// 对每列应用可能失败的 `f`，遇到第一个错误即返回。
    pub fn try_map_columns<T, F>(&self, f: F) -> Result<ColumnMap<T>, RiskError>
    where
        F: Fn(&ReturnSeries<Index>) -> Result<T, RiskError>,
    {
        self.columns
            .iter()
            .map(|(name, series)| f(series).map(|value| (name.clone(), value)))
            .collect()
    }

    /// 每列的 [`DrawdownTable`]（初始财富 1000）。
    pub fn drawdown(&self) -> ColumnMap<DrawdownTable<Index>>
    where
        Index: Clone,
    {
        self.map_columns(ReturnSeries::drawdown)
    }

    /// 每列的半标准差。
    pub fn semideviation(&self) -> ColumnMap<f64> {
        self.map_columns(ReturnSeries::semideviation)
    }

    /// 每列的偏度。
    pub fn skewness(&self) -> ColumnMap<f64> {
        self.map_columns(ReturnSeries::skewness)
    }

    /// 每列的原始峰度。
    pub fn kurtosis(&self) -> ColumnMap<f64> {
        self.map_columns(ReturnSeries::kurtosis)
    }

    /// 每列的 Jarque–Bera 检验结果。
    pub fn jarque_bera(&self) -> Result<ColumnMap<JarqueBera>, RiskError> {
        self.try_map_columns(ReturnSeries::jarque_bera)
    }

    /// 每列在显著性水平 `level` 下的正态性判断。
    pub fn is_normal(&self, level: f64) -> Result<ColumnMap<bool>, RiskError> {
        self.try_map_columns(|series| series.is_normal(level))
    }

    /// 每列在百分位 `level` 处的历史 VaR。
    pub fn var_historic(&self, level: f64) -> Result<ColumnMap<f64>, RiskError> {
        self.try_map_columns(|series| series.var_historic(level))
    }
}

impl<Index, S> FromIterator<(S, ReturnSeries<Index>)> for ReturnTable<Index>
where
    S: Into<SmolStr>,
{
    fn from_iter<Iter>(iter: Iter) -> Self
    where
        Iter: IntoIterator<Item = (S, ReturnSeries<Index>)>,
    {
        Self {
            columns: iter
                .into_iter()
                .map(|(name, series)| (name.into(), series))
                .collect(),
        }
    }
}

/// 收益率输入：单个序列或按列命名的表格。
///
/// 统计量对 `Series` 返回 [`Statistic::Scalar`]，对 `Table` 返回 [`Statistic::Columns`]。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::returns::{ReturnSeries, Returns, Statistic};
///
/// let returns = Returns::from(ReturnSeries::from_values(vec![0.01, -0.02, 0.03]));
///
/// assert!(matches!(returns.semideviation(), Statistic::Scalar(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, From)]
pub enum Returns<Index = MonthlyPeriod> {
    /// 单个收益率序列。
    Series(ReturnSeries<Index>),
    /// 按列命名的收益率表。
    Table(ReturnTable<Index>),
}

/// 标量或按列映射的统计结果。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub enum Statistic<T = f64> {
    /// 单个序列的结果。
    Scalar(T),
    /// 表格每列的结果。
    Columns(ColumnMap<T>),
}

impl<T> Statistic<T> {
    /// 若为标量结果则返回其值。
    pub fn as_scalar(&self) -> Option<&T> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Columns(_) => None,
        }
    }

    /// 若为按列结果则返回该映射。
    pub fn as_columns(&self) -> Option<&ColumnMap<T>> {
        match self {
            Self::Scalar(_) => None,
            Self::Columns(columns) => Some(columns),
        }
    }

    /// 查找按列结果中的某一列。
    pub fn column(&self, name: &str) -> Option<&T> {
        self.as_columns().and_then(|columns| columns.get(name))
    }
}

impl<Index> Returns<Index> {
    /// 半标准差。
    pub fn semideviation(&self) -> Statistic {
        self.reduce(ReturnSeries::semideviation)
    }

    /// 偏度。
    pub fn skewness(&self) -> Statistic {
        self.reduce(ReturnSeries::skewness)
    }

    /// 原始（非超额）峰度。
    pub fn kurtosis(&self) -> Statistic {
        self.reduce(ReturnSeries::kurtosis)
    }

    /// Jarque–Bera 检验结果。
    pub fn jarque_bera(&self) -> Result<Statistic<JarqueBera>, RiskError> {
        self.try_reduce(ReturnSeries::jarque_bera)
    }

    /// 在显著性水平 `level` 下的正态性判断。
    pub fn is_normal(&self, level: f64) -> Result<Statistic<bool>, RiskError> {
        self.try_reduce(|series| series.is_normal(level))
    }

    /// 在百分位 `level` 处的历史 VaR。
    pub fn var_historic(&self, level: f64) -> Result<Statistic, RiskError> {
        self.try_reduce(|series| series.var_historic(level))
    }

    fn reduce<T, F>(&self, f: F) -> Statistic<T>
    where
        F: Fn(&ReturnSeries<Index>) -> T,
    {
        match self {
            Self::Series(series) => Statistic::Scalar(f(series)),
            Self::Table(table) => Statistic::Columns(table.map_columns(f)),
        }
    }

    fn try_reduce<T, F>(&self, f: F) -> Result<Statistic<T>, RiskError>
    where
        F: Fn(&ReturnSeries<Index>) -> Result<T, RiskError>,
    {
        match self {
            Self::Series(series) => f(series).map(Statistic::Scalar),
            Self::Table(table) => table.try_map_columns(f).map(Statistic::Columns),
        }
    }
}

const EXPECTED_SHAPE: &str = "series (array of numbers) or table (object of arrays of numbers)";

/// 从动态 JSON 值构造位置索引的 [`Returns`]。
///
/// - 数字数组（`null` 表示缺失值）→ `Series`
/// - 值为数字数组的对象 → `Table`
/// - 其他任何形状 → [`RiskError::UnsupportedInput`]
impl TryFrom<serde_json::Value> for Returns<usize> {
    type Error = RiskError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Array(values) => series_from_json(values).map(Returns::Series),
            serde_json::Value::Object(columns) => columns
                .into_iter()
                .map(|(name, column)| match column {
                    serde_json::Value::Array(values) => {
                        series_from_json(values).map(|series| (name, series))
                    }
                    other => Err(unsupported(format!(
                        "object containing {}",
                        json_kind(&other)
                    ))),
                })
                .collect::<Result<ReturnTable<usize>, RiskError>>()
                .map(Returns::Table),
            other => Err(unsupported(json_kind(&other).to_string())),
        }
    }
}

fn series_from_json(values: Vec<serde_json::Value>) -> Result<ReturnSeries<usize>, RiskError> {
    values
        .into_iter()
        .map(|value| match value {
            serde_json::Value::Number(number) => number
                .as_f64()
                .ok_or_else(|| unsupported(format!("array containing number {number}"))),
            serde_json::Value::Null => Ok(f64::NAN),
            other => Err(unsupported(format!("array containing {}", json_kind(&other)))),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ReturnSeries::from_values)
}

fn unsupported(found: String) -> RiskError {
    RiskError::UnsupportedInput {
        expected: SmolStr::new_static(EXPECTED_SHAPE),
        found: SmolStr::from(found),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
