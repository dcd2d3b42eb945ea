//! RiskConfig 风险配置模块
//!
//! 本模块提供了风险统计的可序列化配置，支持从 JSON 文件加载。
//! 所有字段缺失时使用默认值：
//!
//! - **initial_wealth**: `1000.0`
//! - **var_level**: `5.0`（第 5 百分位）
//! - **normality_level**: `0.01`（1% 显著性水平）

use crate::error::RiskError;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path};
use tracing::debug;

/// 默认初始财富。
pub const DEFAULT_INITIAL_WEALTH: f64 = 1000.0;

/// 默认历史 VaR 百分位水平。
pub const DEFAULT_VAR_LEVEL: f64 = 5.0;

/// 默认 Jarque–Bera 正态性检验显著性水平。
pub const DEFAULT_NORMALITY_LEVEL: f64 = 0.01;

/// 风险统计的顶级配置。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::config::RiskConfig;
///
/// let config: RiskConfig = serde_json::from_str(r#"{ "var_level": 1.0 }"#).unwrap();
///
/// assert_eq!(config.var_level, 1.0);
/// assert_eq!(config.initial_wealth, 1000.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RiskConfig {
    /// 财富指数的初始值。
    pub initial_wealth: f64,

    /// 历史 VaR 的百分位水平，取值 `[0, 100]`。
    pub var_level: f64,

    /// Jarque–Bera 检验的显著性水平，取值 `(0, 1)`。
    pub normality_level: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            initial_wealth: DEFAULT_INITIAL_WEALTH,
            var_level: DEFAULT_VAR_LEVEL,
            normality_level: DEFAULT_NORMALITY_LEVEL,
        }
    }
}

impl RiskConfig {
    /// 从 JSON 文件加载并校验 [`RiskConfig`]。
    pub fn load<P>(path: P) -> Result<Self, RiskError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        let file = File::open(path)
            .map_err(|error| RiskError::Config(format!("{}: {error}", path.display())))?;

        let config: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|error| RiskError::Config(format!("{}: {error}", path.display())))?;

        debug!(path = %path.display(), ?config, "RiskConfig loaded");

        config.validate()
    }

    /// 校验配置值是否处于有效范围。
    pub fn validate(self) -> Result<Self, RiskError> {
        if !(self.initial_wealth.is_finite() && self.initial_wealth > 0.0) {
            return Err(RiskError::Config(format!(
                "initial_wealth must be finite and positive, found {}",
                self.initial_wealth
            )));
        }

        if !(0.0..=100.0).contains(&self.var_level) {
            return Err(RiskError::invalid_level("var", self.var_level, "[0, 100]"));
        }

        if !(self.normality_level > 0.0 && self.normality_level < 1.0) {
            return Err(RiskError::invalid_level(
                "normality",
                self.normality_level,
                "(0, 1)",
            ));
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_config_validate() {
        struct TestCase {
            input: RiskConfig,
            expected_ok: bool,
        }

        let cases = vec![
            // TC0: defaults are valid
            TestCase {
                input: RiskConfig::default(),
                expected_ok: true,
            },
            // TC1: zero initial wealth
            TestCase {
                input: RiskConfig {
                    initial_wealth: 0.0,
                    ..RiskConfig::default()
                },
                expected_ok: false,
            },
            // TC2: var level above 100
            TestCase {
                input: RiskConfig {
                    var_level: 100.5,
                    ..RiskConfig::default()
                },
                expected_ok: false,
            },
            // TC3: var level boundaries are inclusive
            TestCase {
                input: RiskConfig {
                    var_level: 100.0,
                    ..RiskConfig::default()
                },
                expected_ok: true,
            },
            // TC4: normality level of exactly 1
            TestCase {
                input: RiskConfig {
                    normality_level: 1.0,
                    ..RiskConfig::default()
                },
                expected_ok: false,
            },
            // TC5: NaN normality level
            TestCase {
                input: RiskConfig {
                    normality_level: f64::NAN,
                    ..RiskConfig::default()
                },
                expected_ok: false,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            assert_eq!(test.input.validate().is_ok(), test.expected_ok, "TC{index} failed");
        }
    }

    #[test]
    fn test_risk_config_deserialise_defaults_missing_fields() {
        let config: RiskConfig = serde_json::from_str(r#"{ "normality_level": 0.05 }"#).unwrap();

        assert_eq!(
            config,
            RiskConfig {
                initial_wealth: 1000.0,
                var_level: 5.0,
                normality_level: 0.05,
            }
        );
    }

    #[test]
    fn test_risk_config_rejects_unknown_fields() {
        let result = serde_json::from_str::<RiskConfig>(r#"{ "level": 5.0 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_risk_config_load_missing_file() {
        let result = RiskConfig::load("does/not/exist/risk_config.json");
        assert!(matches!(result, Err(RiskError::Config(_))));
    }
}
