//! MonthlyPeriod 月度周期模块
//!
//! 收益率表的行索引是日历月份。数据文件中的行标签可以是 `YYYYMM` 形式
//! （例如 Fama-French 数据集的 `192607`），也可以是任意日期形式（例如 `2019-03-29`），
//! 两者都会被归并到所在的月份。

use crate::error::RiskError;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, format_smolstr};
use std::{fmt, str::FromStr};

/// 日期形式标签支持的格式，按顺序尝试。
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d", "%m/%d/%Y", "%Y/%m/%d", "%d.%m.%Y"];

/// 日期时间形式标签支持的格式。
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// 日历月份周期，例如 `1926-07`。
///
/// 按时间先后全序排列（先比较年份，再比较月份）。序列化为 `YYYY-MM` 字符串。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::returns::period::MonthlyPeriod;
///
/// let period = MonthlyPeriod::parse_yyyymm("192607").unwrap();
/// assert_eq!(period.to_string(), "1926-07");
///
/// let same = "1926-07-31".parse::<MonthlyPeriod>().unwrap();
/// assert_eq!(period, same);
/// ```
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct MonthlyPeriod {
    year: i32,
    month: u32,
}

impl MonthlyPeriod {
    /// 构造 [`MonthlyPeriod`]，`month` 取值 `1..=12`。
    pub fn new(year: i32, month: u32) -> Result<Self, RiskError> {
        if (1..=12).contains(&month) {
            Ok(Self { year, month })
        } else {
            Err(RiskError::InvalidPeriod {
                label: format_smolstr!("{year:04}-{month:02}"),
                expected: SmolStr::new_static("month in 1..=12"),
            })
        }
    }

    /// 年份。
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 月份（`1..=12`）。
    pub fn month(&self) -> u32 {
        self.month
    }

    /// 周期的第一天。
    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    /// 下一个月份。
    pub fn next(&self) -> Self {
        match self.month {
            12 => Self {
                year: self.year + 1,
                month: 1,
            },
            month => Self {
                year: self.year,
                month: month + 1,
            },
        }
    }

    /// 解析 `YYYYMM` 标签（首尾空白会被忽略）。
    pub fn parse_yyyymm(label: &str) -> Result<Self, RiskError> {
        let trimmed = label.trim();

        let invalid = || RiskError::InvalidPeriod {
            label: SmolStr::new(label),
            expected: SmolStr::new_static("YYYYMM"),
        };

        if trimmed.len() != 6 || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }

        let year = trimmed[..4].parse::<i32>().map_err(|_| invalid())?;
        let month = trimmed[4..].parse::<u32>().map_err(|_| invalid())?;

        Self::new(year, month).map_err(|_| invalid())
    }

    /// 解析日期形式的标签，并归并到其所在月份。
    ///
    /// 支持 `YYYY-MM-DD`、`YYYYMMDD`、`MM/DD/YYYY`、`YYYY/MM/DD`、`DD.MM.YYYY`、
    /// 带时间的 `YYYY-MM-DD HH:MM:SS`，以及仅含月份的 `YYYY-MM` 和 `YYYYMM`。
    pub fn parse_date_like(label: &str) -> Result<Self, RiskError> {
        let trimmed = label.trim();

        if let Some(date) = DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(trimmed, format).ok())
        {
            return Ok(Self::from(date));
        }

        if let Some(datetime) = DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        {
            return Ok(Self::from(datetime.date()));
        }

        // chrono 无法解析缺少日的日期，补全为当月第一天
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d") {
            return Ok(Self::from(date));
        }

        Self::parse_yyyymm(trimmed).map_err(|_| RiskError::InvalidPeriod {
            label: SmolStr::new(label),
            expected: SmolStr::new_static("a date (e.g. YYYY-MM-DD) or month (YYYY-MM, YYYYMM)"),
        })
    }
}

impl From<NaiveDate> for MonthlyPeriod {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl FromStr for MonthlyPeriod {
    type Err = RiskError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::parse_date_like(label)
    }
}

impl TryFrom<String> for MonthlyPeriod {
    type Error = RiskError;

    fn try_from(label: String) -> Result<Self, Self::Error> {
        label.parse()
    }
}

impl From<MonthlyPeriod> for String {
    fn from(period: MonthlyPeriod) -> Self {
        period.to_string()
    }
}

impl fmt::Display for MonthlyPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yyyymm() {
        struct TestCase {
            input: &'static str,
            expected: Option<(i32, u32)>,
        }

        let cases = vec![
            // TC0: Fama-French style label
            TestCase {
                input: "192607",
                expected: Some((1926, 7)),
            },
            // TC1: surrounding whitespace is ignored
            TestCase {
                input: "  201812 ",
                expected: Some((2018, 12)),
            },
            // TC2: month out of range
            TestCase {
                input: "192613",
                expected: None,
            },
            // TC3: month zero
            TestCase {
                input: "192600",
                expected: None,
            },
            // TC4: too short
            TestCase {
                input: "19267",
                expected: None,
            },
            // TC5: non-digit
            TestCase {
                input: "1926-7",
                expected: None,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = MonthlyPeriod::parse_yyyymm(test.input)
                .ok()
                .map(|period| (period.year(), period.month()));
            assert_eq!(actual, test.expected, "TC{index} failed");
        }
    }

    #[test]
    fn test_parse_date_like() {
        struct TestCase {
            input: &'static str,
            expected: Option<(i32, u32)>,
        }

        let cases = vec![
            // TC0: ISO date
            TestCase {
                input: "2019-03-29",
                expected: Some((2019, 3)),
            },
            // TC1: compact date
            TestCase {
                input: "20190329",
                expected: Some((2019, 3)),
            },
            // TC2: US date
            TestCase {
                input: "03/29/2019",
                expected: Some((2019, 3)),
            },
            // TC3: datetime
            TestCase {
                input: "2019-03-29 16:00:00",
                expected: Some((2019, 3)),
            },
            // TC4: month only
            TestCase {
                input: "2019-03",
                expected: Some((2019, 3)),
            },
            // TC5: YYYYMM
            TestCase {
                input: "201903",
                expected: Some((2019, 3)),
            },
            // TC6: slash separated ISO date
            TestCase {
                input: "2019/03/29",
                expected: Some((2019, 3)),
            },
            // TC7: European dotted date
            TestCase {
                input: "29.03.2019",
                expected: Some((2019, 3)),
            },
            // TC8: ISO 8601 datetime
            TestCase {
                input: "2019-03-29T16:00:00",
                expected: Some((2019, 3)),
            },
            // TC9: garbage
            TestCase {
                input: "last tuesday",
                expected: None,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = MonthlyPeriod::parse_date_like(test.input)
                .ok()
                .map(|period| (period.year(), period.month()));
            assert_eq!(actual, test.expected, "TC{index} failed");
        }
    }

    #[test]
    fn test_monthly_period_ordering_and_next() {
        let december = MonthlyPeriod::new(1999, 12).unwrap();
        let january = december.next();

        assert_eq!(january, MonthlyPeriod::new(2000, 1).unwrap());
        assert!(december < january);
        assert_eq!(
            january.first_day(),
            NaiveDate::from_ymd_opt(2000, 1, 1)
        );
    }

    #[test]
    fn test_monthly_period_serde_round_trip() {
        let period = MonthlyPeriod::new(1926, 7).unwrap();

        let json = serde_json::to_string(&period).unwrap();
        assert_eq!(json, r#""1926-07""#);

        let parsed: MonthlyPeriod = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, period);
    }
}
