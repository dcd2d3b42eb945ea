//! Loader CSV 收益率加载模块
//!
//! 百分比收益率 CSV 文件的通用读取器 [`CsvReturnsReader`]，以及基于它的两个加载器：
//!
//! - [`market_cap`]：按市值分组的十分位收益率（`YYYYMM` 周期标签）
//! - [`index`]：指数收益率（日期格式的周期标签）
//!
//! ## 文件格式
//!
//! 第一行为表头，第一列为周期标签（表头名称不限，可以为空），其余列为百分比收益率
//! （`1.5` 表示 1.5%）。以下单元格为缺失值，读取为 `NaN`：
//!
//! - 空单元格
//! - 缺失值标记（不区分大小写）：`NaN`、`-NaN`、`NA`、`N/A`、`#N/A`、`#N/A N/A`、`#NA`、
//!   `<NA>`、`NULL`、`None`、`1.#IND`、`-1.#IND`、`1.#QNAN`、`-1.#QNAN`
//! - 配置的哨兵值（见 [`CsvReturnsReader::sentinel`]）

use crate::error::DataError;
use riskkit::{
    error::RiskError,
    returns::{ReturnSeries, ReturnTable, period::MonthlyPeriod},
};
use rust_decimal::{Decimal, prelude::ToPrimitive};
use smol_str::SmolStr;
use std::{fs::File, io::Read, path::Path};
use tracing::{debug, info};

/// 市值十分位收益率加载器。
pub mod market_cap;

/// 指数收益率加载器。
pub mod index;

/// 不区分大小写匹配的缺失值标记。
const MISSING_TOKENS: &[&str] = &[
    "nan", "-nan", "na", "n/a", "#n/a", "#n/a n/a", "#na", "<na>", "null", "none", "1.#ind",
    "-1.#ind", "1.#qnan", "-1.#qnan",
];

/// 周期标签解析函数。
pub type PeriodParser = fn(&str) -> Result<MonthlyPeriod, RiskError>;

/// 百分比收益率 CSV 读取器。
///
/// 可配置列选择与重命名、缺失值哨兵和周期标签解析函数。未选择任何列时保留所有收益率列。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::returns::period::MonthlyPeriod;
/// use riskkit_data::loader::CsvReturnsReader;
/// use rust_decimal::Decimal;
///
/// let csv = ",Lo 10,Hi 10\n192607,-0.5,3.1\n192608,-99.99,2.5\n";
///
/// let table = CsvReturnsReader::new(MonthlyPeriod::parse_yyyymm)
///     .select("Lo 10", "SmallCap")
///     .sentinel(Decimal::new(-9999, 2))
///     .read(csv.as_bytes())
///     .unwrap();
///
/// let small_cap = table.column("SmallCap").unwrap();
/// assert_eq!(small_cap.values()[0], -0.005);
/// assert!(small_cap.values()[1].is_nan());
/// assert!(table.column("Hi 10").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct CsvReturnsReader {
    columns: Vec<ColumnSelection>,
    sentinel: Option<Decimal>,
    period: PeriodParser,
}

#[derive(Debug, Clone)]
struct ColumnSelection {
    source: SmolStr,
    target: SmolStr,
}

#[derive(Debug)]
struct Column {
    position: usize,
    name: SmolStr,
    values: Vec<f64>,
    missing: usize,
}

impl CsvReturnsReader {
    /// 使用周期标签解析函数构造读取器（保留所有列，没有哨兵值）。
    pub fn new(period: PeriodParser) -> Self {
        Self {
            columns: Vec::new(),
            sentinel: None,
            period,
        }
    }

    /// 选择源列 `source` 并重命名为 `target`。按调用顺序决定输出列顺序。
    pub fn select<S, T>(mut self, source: S, target: T) -> Self
    where
        S: Into<SmolStr>,
        T: Into<SmolStr>,
    {
        self.columns.push(ColumnSelection {
            source: source.into(),
            target: target.into(),
        });
        self
    }

    /// 等于 `sentinel` 的值视为缺失值。
    pub fn sentinel(self, sentinel: Decimal) -> Self {
        Self {
            sentinel: Some(sentinel),
            ..self
        }
    }

    /// 读取 `path` 处的 CSV 文件。
    pub fn read_path<P>(&self, path: P) -> Result<ReturnTable, DataError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataError::Io {
            path: SmolStr::from(path.display().to_string()),
            source,
        })?;

        let table = self.read(file)?;

        info!(
            path = %path.display(),
            rows = table.iter().next().map_or(0, |(_, series)| series.len()),
            columns = table.len(),
            "loaded returns"
        );

        Ok(table)
    }

    /// 从任意 [`Read`] 读取 CSV 数据。
    pub fn read<R>(&self, reader: R) -> Result<ReturnTable, DataError>
    where
        R: Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut columns = self.resolve_columns(&headers)?;
        let mut index = Vec::new();

        for (row, record) in reader.records().enumerate() {
            let record = record?;
            // 表头占第 1 行
            let line = record
                .position()
                .map_or(row as u64 + 2, |position| position.line());

            let label = record.get(0).unwrap_or_default();
            let period = (self.period)(label).map_err(|source| DataError::Period { line, source })?;
            index.push(period);

            for column in columns.iter_mut() {
                let cell = record.get(column.position).unwrap_or_default();
                let value = self.parse_value(cell).ok_or_else(|| DataError::Value {
                    line,
                    column: column.name.clone(),
                    value: SmolStr::new(cell),
                })?;

                if value.is_nan() {
                    column.missing += 1;
                }
                column.values.push(value);
            }
        }

        columns
            .into_iter()
            .map(|column| {
                if column.missing > 0 {
                    debug!(
                        column = %column.name,
                        missing = column.missing,
                        "missing returns set to NaN"
                    );
                }
                ReturnSeries::new(index.clone(), column.values).map(|series| (column.name, series))
            })
            .collect::<Result<ReturnTable, RiskError>>()
            .map_err(DataError::from)
    }

    fn resolve_columns(&self, headers: &csv::StringRecord) -> Result<Vec<Column>, DataError> {
        // 第一列为周期标签
        if self.columns.is_empty() {
            return Ok(headers
                .iter()
                .enumerate()
                .skip(1)
                .map(|(position, name)| Column::new(position, SmolStr::new(name)))
                .collect());
        }

        self.columns
            .iter()
            .map(|selection| {
                headers
                    .iter()
                    .enumerate()
                    .skip(1)
                    .find_map(|(position, name)| (name == selection.source).then_some(position))
                    .map(|position| Column::new(position, selection.target.clone()))
                    .ok_or_else(|| DataError::MissingColumn(selection.source.clone()))
            })
            .collect()
    }

    // 百分比转小数；缺失值为 NaN，无法解析时为 None
    fn parse_value(&self, cell: &str) -> Option<f64> {
        if cell.is_empty() || is_missing_token(cell) {
            return Some(f64::NAN);
        }

        let percent = cell
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(cell))
            .ok()?;

        if self.sentinel == Some(percent) {
            return Some(f64::NAN);
        }

        percent.checked_div(Decimal::ONE_HUNDRED)?.to_f64()
    }
}

fn is_missing_token(cell: &str) -> bool {
    MISSING_TOKENS
        .iter()
        .any(|token| token.eq_ignore_ascii_case(cell))
}

impl Column {
    fn new(position: usize, name: SmolStr) -> Self {
        Self {
            position,
            name,
            values: Vec::new(),
            missing: 0,
        }
    }
}
