// 允许 dev-dependencies 中的未使用 extern crate 警告
// 这些依赖仅在示例/测试/基准测试中使用，不在库代码中使用
#![allow(unused_extern_crates)]
#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms,
    rust_2024_compatibility
)]
#![allow(clippy::type_complexity, type_alias_bounds)]

//! # RiskKit-Data
//! 把百分比收益率 CSV 文件加载为按月度周期索引的 [`ReturnTable`](riskkit::returns::ReturnTable)。
//! * **精确缩放**：百分比值先解析为 [`Decimal`](rust_decimal::Decimal) 再除以 100，最后转换为 `f64`。
//! * **缺失值**：空单元格与可选的哨兵值（例如 `-99.99`）都被视为缺失值（`NaN`）。
//! * **可组合**：两个加载器都构建在同一个 [`CsvReturnsReader`](loader::CsvReturnsReader) 之上。
//!
//! ## 加载器
//! - [`load_market_cap_returns`](loader::market_cap::load_market_cap_returns)：按市值分组的最小/最大十分位收益率，
//!   `YYYYMM` 周期标签。
//! - [`load_index_returns`](loader::index::load_index_returns)：指数收益率，日期格式的周期标签，保留所有列。
//!
//! ## 示例
//! ```rust,no_run
//! use riskkit::statistic::summary::RiskSummaryGenerator;
//! use riskkit_data::loader::market_cap::load_market_cap_returns;
//!
//! let returns = load_market_cap_returns("data/Portfolios_Formed_on_ME_monthly_EW.csv").unwrap();
//!
//! RiskSummaryGenerator::default()
//!     .generate_table(&returns)
//!     .printstd();
//! ```

/// 所有可能的 RiskKit-Data 错误。
pub mod error;

/// CSV 收益率加载器。
pub mod loader;
