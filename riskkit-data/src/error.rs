//! Error 错误处理模块
//!
//! 本模块定义了加载收益率数据文件可能遇到的所有错误类型。
//!
//! 注意：缺失值（空单元格、缺失值标记、哨兵值）**不是**错误，它们被读取为 `NaN`。

use riskkit::error::RiskError;
use smol_str::SmolStr;
use thiserror::Error;

/// 加载收益率数据文件时可能遇到的所有错误。
#[derive(Debug, Error)]
pub enum DataError {
    /// 无法打开数据文件。
    #[error("failed to open {path}: {source}")]
    Io {
        /// 文件路径
        path: SmolStr,
        /// 底层 I/O 错误
        source: std::io::Error,
    },

    /// CSV 读取错误（例如行的列数不一致）。
    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    /// 表头中不存在所选择的列。
    #[error("missing column: {0}")]
    MissingColumn(SmolStr),

    /// 无法解析的周期标签。
    #[error("line {line}: {source}")]
    Period {
        /// CSV 行号（表头为第 1 行）
        line: u64,
        /// 周期解析错误
        source: RiskError,
    },

    /// 既不是数字也不是缺失值的单元格。
    #[error("line {line}, column {column}: invalid value {value:?}")]
    Value {
        /// CSV 行号（表头为第 1 行）
        line: u64,
        /// 列名
        column: SmolStr,
        /// 原始单元格内容
        value: SmolStr,
    },

    /// 构造收益率序列或表时的 RiskKit 错误。
    #[error("RiskKit: {0}")]
    Risk(#[from] RiskError),
}
