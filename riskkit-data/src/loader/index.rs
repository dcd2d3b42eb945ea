//! 指数月度收益率，第一列为日期形式的周期标签，保留所有收益率列。

use crate::{error::DataError, loader::CsvReturnsReader};
use riskkit::returns::{ReturnTable, period::MonthlyPeriod};
use std::path::Path;

/// 指数收益率文件的 [`CsvReturnsReader`]：日期形式的周期标签，保留所有列。
pub fn index_reader() -> CsvReturnsReader {
    CsvReturnsReader::new(MonthlyPeriod::parse_date_like)
}

/// 加载 `path` 处的指数收益率文件。
///
/// 每个收益率列都被保留，百分比值除以 100，行以标签所在的 [`MonthlyPeriod`] 索引
/// （支持的日期格式参见 [`MonthlyPeriod::parse_date_like`]）。
pub fn load_index_returns<P>(path: P) -> Result<ReturnTable, DataError>
where
    P: AsRef<Path>,
{
    index_reader().read_path(path)
}
