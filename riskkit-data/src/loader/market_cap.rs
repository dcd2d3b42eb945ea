//! 按市值分组的十分位组合月度收益率（Fama-French `Portfolios_Formed_on_ME` 格式）。
//!
//! 只保留最小十分位（`Lo 10`）与最大十分位（`Hi 10`），分别重命名为 [`SMALL_CAP`] 与 [`LARGE_CAP`]。

use crate::{error::DataError, loader::CsvReturnsReader};
use riskkit::returns::{ReturnTable, period::MonthlyPeriod};
use rust_decimal::Decimal;
use std::path::Path;

/// 最小市值十分位的源列名。
pub const SMALL_CAP_SOURCE: &str = "Lo 10";

/// 最大市值十分位的源列名。
pub const LARGE_CAP_SOURCE: &str = "Hi 10";

/// 最小市值十分位的输出列名。
pub const SMALL_CAP: &str = "SmallCap";

/// 最大市值十分位的输出列名。
pub const LARGE_CAP: &str = "LargeCap";

/// 数据文件中表示缺失值的哨兵：`-99.99`。
pub fn missing_sentinel() -> Decimal {
    Decimal::new(-9999, 2)
}

/// 市值十分位文件的 [`CsvReturnsReader`]：`YYYYMM` 周期标签，`-99.99` 为缺失值。
pub fn market_cap_reader() -> CsvReturnsReader {
    CsvReturnsReader::new(MonthlyPeriod::parse_yyyymm)
        .select(SMALL_CAP_SOURCE, SMALL_CAP)
        .select(LARGE_CAP_SOURCE, LARGE_CAP)
        .sentinel(missing_sentinel())
}

/// 加载 `path` 处的市值十分位收益率文件，返回 `SmallCap`、`LargeCap` 两列的收益率表。
///
/// 百分比值除以 100，`-99.99` 映射为缺失值（`NaN`），行以 [`MonthlyPeriod`] 索引。
pub fn load_market_cap_returns<P>(path: P) -> Result<ReturnTable, DataError>
where
    P: AsRef<Path>,
{
    market_cap_reader().read_path(path)
}
