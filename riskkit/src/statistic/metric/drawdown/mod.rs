//! Drawdown 回撤模块
//!
//! 本模块提供了 Drawdown（回撤）的计算逻辑。
//! 回撤是财富指数从历史峰值到当前值的百分比下降，是衡量下行波动率的指标。
//!
//! # 核心概念
//!
//! - **DrawdownTable**: 逐期的财富指数（Wealth）、历史峰值（Peaks）与回撤（Drawdown）
//! - **DrawdownGenerator**: 流式回撤生成器，在财富恢复到峰值以上时产出 [`DrawdownEpisode`]
//! - **Max Drawdown**: 最深的一次回撤，参见 [`max`]
//!
//! # 计算公式
//!
//! - `wealth_i = W0 × ∏(1 + r_k), k ≤ i`
//! - `peak_i = max(wealth_1..wealth_i)`
//! - `drawdown_i = (wealth_i - peak_i) / peak_i`
//!
//! # 参考文档
//!
//! <https://www.investopedia.com/terms/d/drawdown.asp>

use crate::{Labelled, config::DEFAULT_INITIAL_WEALTH, returns::ReturnSeries};
use derive_more::Constructor;
use itertools::izip;
use max::{MaxDrawdown, MaxDrawdownGenerator};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 最大回撤计算逻辑。
pub mod max;

/// 财富指数列名。
pub const WEALTH: &str = "Wealth";

/// 历史峰值列名。
pub const PEAKS: &str = "Peaks";

/// 回撤列名。
pub const DRAWDOWN: &str = "Drawdown";

/// 逐期回撤表：与输入序列等长、共享索引的 `Wealth`、`Peaks`、`Drawdown` 三列。
///
/// ## 特殊情况
///
/// - 空输入产生空表
/// - 缺失收益（`NaN`）所在行三列均为 `NaN`，累积乘积与历史峰值跳过该行继续计算
/// - 峰值为 0（例如首个收益恰为 -100%）时回撤为 `NaN`（`0 / 0`）
///
/// # 使用示例
///
/// ```rust
/// use riskkit::returns::ReturnSeries;
///
/// let table = ReturnSeries::from_values(vec![0.1, -0.2, 0.1]).drawdown();
///
/// assert!((table.wealth()[2] - 968.0).abs() < 1e-9);
/// assert!((table.peaks()[2] - 1100.0).abs() < 1e-9);
/// assert!((table.drawdown()[1] + 0.2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DrawdownTable<Index> {
    index: Vec<Index>,
    wealth: Vec<f64>,
    peaks: Vec<f64>,
    drawdown: Vec<f64>,
}

impl<Index> Default for DrawdownTable<Index> {
    fn default() -> Self {
        Self {
            index: Vec::new(),
            wealth: Vec::new(),
            peaks: Vec::new(),
            drawdown: Vec::new(),
        }
    }
}

impl<Index> DrawdownTable<Index>
where
    Index: Clone,
{
    /// 以默认初始财富（1000）计算 `series` 的回撤表。
    pub fn calculate(series: &ReturnSeries<Index>) -> Self {
        Self::calculate_from(series, DEFAULT_INITIAL_WEALTH)
    }

    /// 以初始财富 `initial_wealth` 计算 `series` 的回撤表。
    pub fn calculate_from(series: &ReturnSeries<Index>, initial_wealth: f64) -> Self {
        let capacity = series.len();
        let mut table = Self {
            index: series.index().to_vec(),
            wealth: Vec::with_capacity(capacity),
            peaks: Vec::with_capacity(capacity),
            drawdown: Vec::with_capacity(capacity),
        };

        let mut wealth = initial_wealth;
        let mut peak: Option<f64> = None;
        let mut missing = 0usize;

        for value in series.values() {
            if value.is_nan() {
                missing += 1;
                table.wealth.push(f64::NAN);
                table.peaks.push(f64::NAN);
                table.drawdown.push(f64::NAN);
                continue;
            }

            wealth *= 1.0 + value;
            let next_peak = peak.map_or(wealth, |peak| peak.max(wealth));
            peak = Some(next_peak);

            table.wealth.push(wealth);
            table.peaks.push(next_peak);
            table.drawdown.push((wealth - next_peak) / next_peak);
        }

        if missing > 0 {
            debug!(
                rows = capacity,
                missing, "drawdown rows with missing returns set to NaN"
            );
        }

        table
    }

    /// 最深的一次回撤（峰值与谷值标签）。
    ///
    /// 空表或财富从未低于历史峰值时返回 `None`。
    ///
    /// # 使用示例
    ///
    /// ```rust
    /// use riskkit::returns::ReturnSeries;
    ///
    /// let table = ReturnSeries::from_values(vec![0.1, -0.2, 0.1, 0.5, -0.1]).drawdown();
    /// let max = table.max_drawdown().unwrap();
    ///
    /// assert!((max.value() + 0.2).abs() < 1e-12);
    /// assert_eq!((*max.peak(), *max.trough()), (0, 1));
    /// ```
    pub fn max_drawdown(&self) -> Option<MaxDrawdown<Index>> {
        let mut generator = MaxDrawdownGenerator::default();
        for episode in self.episodes() {
            generator.update(&episode);
        }
        generator.generate()
    }

    /// 所有回撤期，按时间顺序。
    ///
    /// 已恢复的回撤期带有恢复标签；末尾尚未恢复的回撤期 `end` 为 `None`。
    pub fn episodes(&self) -> Vec<DrawdownEpisode<Index>> {
        let mut generator = DrawdownGenerator::default();

        let mut episodes = self
            .index
            .iter()
            .zip(self.wealth.iter())
            .filter_map(|(label, wealth)| generator.update(Labelled::new(*wealth, label.clone())))
            .collect::<Vec<_>>();

        episodes.extend(generator.generate());
        episodes
    }
}

impl<Index> DrawdownTable<Index> {
    /// 行数。
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// 是否为空表。
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// 周期索引。
    pub fn index(&self) -> &[Index] {
        &self.index
    }

    /// 财富指数列。
    pub fn wealth(&self) -> &[f64] {
        &self.wealth
    }

    /// 历史峰值列。
    pub fn peaks(&self) -> &[f64] {
        &self.peaks
    }

    /// 回撤列（≤ 0）。
    pub fn drawdown(&self) -> &[f64] {
        &self.drawdown
    }

    /// 按列名（[`WEALTH`]、[`PEAKS`]、[`DRAWDOWN`]）查找列。
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        match name {
            WEALTH => Some(&self.wealth),
            PEAKS => Some(&self.peaks),
            DRAWDOWN => Some(&self.drawdown),
            _ => None,
        }
    }

    /// 按顺序迭代 `(标签, 财富, 峰值, 回撤)` 行。
    pub fn iter(&self) -> impl Iterator<Item = (&Index, f64, f64, f64)> + '_ {
        izip!(
            self.index.iter(),
            self.wealth.iter().copied(),
            self.peaks.iter().copied(),
            self.drawdown.iter().copied()
        )
    }
}

/// 一次回撤期：从峰值开始，经过谷值，直到财富恢复到峰值以上。
///
/// ## 字段说明
///
/// - **value**: 回撤期内最深的回撤（≤ 0，例如 -0.2 表示 20% 的回撤）
/// - **start**: 峰值标签
/// - **trough**: 谷值标签
/// - **end**: 恢复标签，尚未恢复时为 `None`
#[derive(Debug, Clone, PartialEq, PartialOrd, Deserialize, Serialize, Constructor)]
pub struct DrawdownEpisode<Label> {
    /// 回撤期内最深的回撤（≤ 0）。
    pub value: f64,
    /// 峰值标签。
    pub start: Label,
    /// 谷值标签。
    pub trough: Label,
    /// 恢复标签。
    pub end: Option<Label>,
}

/// [`DrawdownEpisode`] 生成器。
///
/// 逐点消费财富值，维护历史峰值和当前回撤期内最深的回撤，
/// 并在财富超过峰值时产出已结束的回撤期。缺失值（`NaN`）被跳过。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::{Labelled, statistic::metric::drawdown::DrawdownGenerator};
///
/// let mut generator = DrawdownGenerator::init(Labelled::new(100.0, 0));
///
/// assert_eq!(generator.update(Labelled::new(80.0, 1)), None);
///
/// let episode = generator.update(Labelled::new(120.0, 2)).unwrap();
/// assert!((episode.value + 0.2).abs() < 1e-12);
/// assert_eq!((episode.start, episode.trough, episode.end), (0, 1, Some(2)));
/// ```
#[derive(Debug, Clone, PartialEq, PartialOrd, Deserialize, Serialize, Constructor)]
pub struct DrawdownGenerator<Label> {
    /// 当前峰值。
    pub peak: Option<f64>,
    /// 当前回撤期内最深的回撤（≤ 0）。
    pub drawdown_max: f64,
    /// 峰值标签。
    pub label_peak: Option<Label>,
    /// 谷值标签。
    pub label_trough: Option<Label>,
}

impl<Label> Default for DrawdownGenerator<Label> {
    fn default() -> Self {
        Self {
            peak: None,
            drawdown_max: 0.0,
            label_peak: None,
            label_trough: None,
        }
    }
}

impl<Label> DrawdownGenerator<Label>
where
    Label: Clone,
{
    /// 从初始财富点初始化 [`DrawdownGenerator`]。
    pub fn init(point: Labelled<f64, Label>) -> Self {
        Self {
            peak: Some(point.value),
            drawdown_max: 0.0,
            label_peak: Some(point.label),
            label_trough: None,
        }
    }

    /// 使用最新的财富点更新内部状态。
    ///
    /// 如果财富超过峰值且此前存在回撤，返回已结束的 `Some(DrawdownEpisode)`，否则返回 `None`。
    pub fn update(&mut self, point: Labelled<f64, Label>) -> Option<DrawdownEpisode<Label>> {
        if point.value.is_nan() {
            return None;
        }

        let Some(peak) = self.peak else {
            self.peak = Some(point.value);
            self.label_peak = Some(point.label);
            return None;
        };

        if point.value > peak {
            let ended = self.episode(Some(point.label.clone()));

            self.peak = Some(point.value);
            self.label_peak = Some(point.label);
            self.label_trough = None;
            self.drawdown_max = 0.0;

            ended
        } else {
            // 峰值为 0 时结果为 NaN，比较为 false
            let drawdown_current = (point.value - peak) / peak;
            if drawdown_current < self.drawdown_max {
                self.drawdown_max = drawdown_current;
                self.label_trough = Some(point.label);
            }

            None
        }
    }

    /// 当前尚未恢复的回撤期（如果非零），`end` 为 `None`。
    pub fn generate(&self) -> Option<DrawdownEpisode<Label>> {
        self.episode(None)
    }

    fn episode(&self, end: Option<Label>) -> Option<DrawdownEpisode<Label>> {
        let start = self.label_peak.clone()?;
        let trough = self.label_trough.clone()?;

        (self.drawdown_max < 0.0).then(|| DrawdownEpisode::new(self.drawdown_max, start, trough, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::f64_is_eq;

    fn assert_columns_eq(actual: &[f64], expected: &[f64], name: &str) {
        assert_eq!(actual.len(), expected.len(), "{name} length");
        for (index, (actual, expected)) in actual.iter().zip(expected).enumerate() {
            assert!(
                f64_is_eq(*actual, *expected, 1e-9),
                "{name} row {index} failed: actual {actual}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_drawdown_table_calculate() {
        struct TestCase {
            input: Vec<f64>,
            expected_wealth: Vec<f64>,
            expected_peaks: Vec<f64>,
            expected_drawdown: Vec<f64>,
        }

        let cases = vec![
            // TC0: rise, fall and partial recovery
            TestCase {
                input: vec![0.1, -0.2, 0.1],
                expected_wealth: vec![1100.0, 880.0, 968.0],
                expected_peaks: vec![1100.0, 1100.0, 1100.0],
                expected_drawdown: vec![0.0, -0.2, -0.12],
            },
            // TC1: all zero returns
            TestCase {
                input: vec![0.0; 4],
                expected_wealth: vec![1000.0; 4],
                expected_peaks: vec![1000.0; 4],
                expected_drawdown: vec![0.0; 4],
            },
            // TC2: first period below initial wealth is its own peak
            TestCase {
                input: vec![-0.5, 0.5],
                expected_wealth: vec![500.0, 750.0],
                expected_peaks: vec![500.0, 750.0],
                expected_drawdown: vec![0.0, 0.0],
            },
            // TC3: missing return is skipped by the running product and peak
            TestCase {
                input: vec![0.1, f64::NAN, -0.2],
                expected_wealth: vec![1100.0, f64::NAN, 880.0],
                expected_peaks: vec![1100.0, f64::NAN, 1100.0],
                expected_drawdown: vec![0.0, f64::NAN, -0.2],
            },
            // TC4: total loss in the first period yields a zero peak
            TestCase {
                input: vec![-1.0, 0.1],
                expected_wealth: vec![0.0, 0.0],
                expected_peaks: vec![0.0, 0.0],
                expected_drawdown: vec![f64::NAN, f64::NAN],
            },
            // TC5: total loss after a positive peak
            TestCase {
                input: vec![0.1, -1.0],
                expected_wealth: vec![1100.0, 0.0],
                expected_peaks: vec![1100.0, 1100.0],
                expected_drawdown: vec![0.0, -1.0],
            },
            // TC6: empty input
            TestCase {
                input: vec![],
                expected_wealth: vec![],
                expected_peaks: vec![],
                expected_drawdown: vec![],
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let series = ReturnSeries::from_values(test.input);
            let actual = DrawdownTable::calculate(&series);

            assert_eq!(actual.len(), series.len(), "TC{index} failed");
            assert_eq!(actual.index(), series.index(), "TC{index} failed");
            assert_columns_eq(actual.wealth(), &test.expected_wealth, &format!("TC{index} {WEALTH}"));
            assert_columns_eq(actual.peaks(), &test.expected_peaks, &format!("TC{index} {PEAKS}"));
            assert_columns_eq(
                actual.drawdown(),
                &test.expected_drawdown,
                &format!("TC{index} {DRAWDOWN}"),
            );
        }
    }

    #[test]
    fn test_drawdown_is_never_positive() {
        let series = ReturnSeries::from_values(vec![0.05, -0.1, 0.2, -0.3, 0.01, 0.4, -0.02]);
        let table = series.drawdown();

        for (label, wealth, peak, drawdown) in table.iter() {
            assert!(drawdown <= 0.0, "row {label}: {drawdown}");
            assert!(peak >= wealth, "row {label}");
        }
        assert!(table.peaks().windows(2).all(|pair| pair[1] >= pair[0]));
    }

    #[test]
    fn test_drawdown_table_column_lookup() {
        let table = ReturnSeries::from_values(vec![0.1, -0.2]).drawdown_from(100.0);

        assert!(f64_is_eq(table.column(WEALTH).unwrap()[1], 88.0, 1e-9));
        assert!(f64_is_eq(table.column(PEAKS).unwrap()[1], 110.0, 1e-9));
        assert!(f64_is_eq(table.column(DRAWDOWN).unwrap()[1], -0.2, 1e-12));
        assert!(table.column("Returns").is_none());
    }

    #[test]
    fn test_drawdown_generator_update() {
        struct TestCase {
            input: Labelled<f64, usize>,
            expected_state: DrawdownGenerator<usize>,
            expected_output: Option<DrawdownEpisode<usize>>,
        }

        let mut generator = DrawdownGenerator::default();

        let cases = vec![
            // TC0: first ever wealth point
            TestCase {
                input: Labelled::new(100.0, 0),
                expected_state: DrawdownGenerator::new(Some(100.0), 0.0, Some(0), None),
                expected_output: None,
            },
            // TC1: peak increases with no drawdown
            TestCase {
                input: Labelled::new(110.0, 1),
                expected_state: DrawdownGenerator::new(Some(110.0), 0.0, Some(1), None),
                expected_output: None,
            },
            // TC2: first drawdown occurs
            TestCase {
                input: Labelled::new(99.0, 2),
                expected_state: DrawdownGenerator::new(Some(110.0), -0.1, Some(1), Some(2)),
                expected_output: None,
            },
            // TC3: drawdown deepens
            TestCase {
                input: Labelled::new(88.0, 3),
                expected_state: DrawdownGenerator::new(Some(110.0), -0.2, Some(1), Some(3)),
                expected_output: None,
            },
            // TC4: partial recovery keeps the trough
            TestCase {
                input: Labelled::new(95.0, 4),
                expected_state: DrawdownGenerator::new(Some(110.0), -0.2, Some(1), Some(3)),
                expected_output: None,
            },
            // TC5: missing value is skipped
            TestCase {
                input: Labelled::new(f64::NAN, 5),
                expected_state: DrawdownGenerator::new(Some(110.0), -0.2, Some(1), Some(3)),
                expected_output: None,
            },
            // TC6: full recovery above previous peak emits the episode
            TestCase {
                input: Labelled::new(115.0, 6),
                expected_state: DrawdownGenerator::new(Some(115.0), 0.0, Some(6), None),
                expected_output: Some(DrawdownEpisode::new(-0.2, 1, 3, Some(6))),
            },
            // TC7: equal to previous peak does not start a new episode
            TestCase {
                input: Labelled::new(115.0, 7),
                expected_state: DrawdownGenerator::new(Some(115.0), 0.0, Some(6), None),
                expected_output: None,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let output = generator.update(test.input);

            assert_eq!(generator.peak, test.expected_state.peak, "TC{index} failed");
            assert!(
                f64_is_eq(
                    generator.drawdown_max,
                    test.expected_state.drawdown_max,
                    1e-12
                ),
                "TC{index} failed"
            );
            assert_eq!(generator.label_peak, test.expected_state.label_peak, "TC{index} failed");
            assert_eq!(
                generator.label_trough, test.expected_state.label_trough,
                "TC{index} failed"
            );

            match (output, test.expected_output) {
                (None, None) => {}
                (Some(actual), Some(expected)) => {
                    assert!(f64_is_eq(actual.value, expected.value, 1e-12), "TC{index} failed");
                    assert_eq!(
                        (actual.start, actual.trough, actual.end),
                        (expected.start, expected.trough, expected.end),
                        "TC{index} failed"
                    );
                }
                (actual, expected) => {
                    panic!("TC{index} failed: actual {actual:?}, expected {expected:?}")
                }
            }
        }
    }

    #[test]
    fn test_drawdown_table_episodes() {
        // wealth = [1100, 880, 968, 1452, 1306.8, 1437.48, 1581.228]
        let series = ReturnSeries::from_values(vec![0.1, -0.2, 0.1, 0.5, -0.1, 0.1, 0.1]);
        let episodes = series.drawdown().episodes();

        assert_eq!(episodes.len(), 2);

        assert!(f64_is_eq(episodes[0].value, -0.2, 1e-12));
        assert_eq!((episodes[0].start, episodes[0].trough, episodes[0].end), (0, 1, Some(3)));

        assert!(f64_is_eq(episodes[1].value, -0.1, 1e-12));
        assert_eq!((episodes[1].start, episodes[1].trough, episodes[1].end), (3, 4, Some(6)));
    }

    #[test]
    fn test_drawdown_table_trailing_episode_is_unrecovered() {
        let series = ReturnSeries::from_values(vec![0.1, -0.2, -0.1]);
        let episodes = series.drawdown().episodes();

        assert_eq!(episodes.len(), 1);
        assert!(f64_is_eq(episodes[0].value, -0.28, 1e-12));
        assert_eq!((episodes[0].start, episodes[0].trough, episodes[0].end), (0, 2, None));
    }

    #[test]
    fn test_drawdown_table_no_episodes_when_monotonic() {
        let table = ReturnSeries::from_values(vec![0.01, 0.02, 0.0, 0.03]).drawdown();

        assert!(table.episodes().is_empty());
        assert!(table.max_drawdown().is_none());
        assert!(DrawdownTable::<usize>::default().max_drawdown().is_none());
    }
}
