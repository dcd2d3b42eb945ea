//! Max Drawdown 最大回撤模块
//!
//! 最大回撤是财富指数从峰值到谷值的最深下降。
//!
//! # 参考文档
//!
//! <https://www.investopedia.com/terms/m/maximum-drawdown-mdd.asp>

use crate::statistic::metric::drawdown::DrawdownEpisode;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// [`MaxDrawdown`] 是所有回撤期中最深的一次 [`DrawdownEpisode`]。
///
/// ## 解释
///
/// - **较深的 Max Drawdown**: 表示资产经历过较大的价值下降
/// - **较浅的 Max Drawdown**: 表示资产相对稳定
#[derive(Debug, Clone, PartialEq, PartialOrd, Deserialize, Serialize, Constructor)]
pub struct MaxDrawdown<Label>(pub DrawdownEpisode<Label>);

impl<Label> MaxDrawdown<Label> {
    /// 最大回撤值（≤ 0）。
    pub fn value(&self) -> f64 {
        self.0.value
    }

    /// 峰值标签。
    pub fn peak(&self) -> &Label {
        &self.0.start
    }

    /// 谷值标签。
    pub fn trough(&self) -> &Label {
        &self.0.trough
    }

    /// 恢复标签，尚未恢复时为 `None`。
    pub fn recovery(&self) -> Option<&Label> {
        self.0.end.as_ref()
    }
}

/// [`MaxDrawdown`] 生成器。
///
/// 跟踪所有回撤期，当新的回撤期更深时替换当前最大回撤。
#[derive(Debug, Clone, PartialEq, PartialOrd, Deserialize, Serialize, Constructor)]
pub struct MaxDrawdownGenerator<Label> {
    /// 当前最大回撤。
    pub max: Option<MaxDrawdown<Label>>,
}

impl<Label> Default for MaxDrawdownGenerator<Label> {
    fn default() -> Self {
        Self { max: None }
    }
}

impl<Label> MaxDrawdownGenerator<Label>
where
    Label: Clone,
{
    /// 如果 `next` 比当前 [`MaxDrawdown`] 更深，则替换它。
    pub fn update(&mut self, next: &DrawdownEpisode<Label>) {
        let max = match self.max.take() {
            Some(current) if next.value >= current.value() => current,
            _ => MaxDrawdown(next.clone()),
        };

        self.max = Some(max);
    }

    /// 当前的 [`MaxDrawdown`]（如果存在）。
    pub fn generate(&self) -> Option<MaxDrawdown<Label>> {
        self.max.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::returns::{ReturnSeries, period::MonthlyPeriod};

    #[test]
    fn test_max_drawdown_generator_update() {
        struct TestCase {
            input: DrawdownEpisode<usize>,
            expected: MaxDrawdown<usize>,
        }

        let mut generator = MaxDrawdownGenerator::default();

        let cases = vec![
            // TC0: first ever episode
            TestCase {
                input: DrawdownEpisode::new(-0.25, 0, 2, Some(3)),
                expected: MaxDrawdown(DrawdownEpisode::new(-0.25, 0, 2, Some(3))),
            },
            // TC1: deeper episode replaces the max
            TestCase {
                input: DrawdownEpisode::new(-0.55, 3, 5, Some(8)),
                expected: MaxDrawdown(DrawdownEpisode::new(-0.55, 3, 5, Some(8))),
            },
            // TC2: shallower episode is ignored
            TestCase {
                input: DrawdownEpisode::new(-0.1, 8, 9, None),
                expected: MaxDrawdown(DrawdownEpisode::new(-0.55, 3, 5, Some(8))),
            },
            // TC3: equally deep later episode keeps the earlier one
            TestCase {
                input: DrawdownEpisode::new(-0.55, 10, 11, None),
                expected: MaxDrawdown(DrawdownEpisode::new(-0.55, 3, 5, Some(8))),
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            generator.update(&test.input);
            assert_eq!(generator.generate(), Some(test.expected), "TC{index} failed");
        }
    }

    #[test]
    fn test_max_drawdown_labels_peak_and_trough_periods() {
        let start = MonthlyPeriod::new(2008, 1).unwrap();
        let series = ReturnSeries::from_iter(
            std::iter::successors(Some(start), |period| Some(period.next()))
                .zip([0.05, -0.1, -0.2, 0.1, 0.4, -0.05]),
        );

        let max = series.drawdown().max_drawdown().unwrap();

        // (1050 × 0.9 × 0.8 - 1050) / 1050
        assert!((max.value() + 0.28).abs() < 1e-12);
        assert_eq!(*max.peak(), MonthlyPeriod::new(2008, 1).unwrap());
        assert_eq!(*max.trough(), MonthlyPeriod::new(2008, 3).unwrap());
        assert_eq!(max.recovery(), Some(&MonthlyPeriod::new(2008, 5).unwrap()));
    }
}
