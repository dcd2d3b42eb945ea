//! Algorithm 统计算法模块
//!
//! 本模块提供了用于分析数据集的统计算法。
//! 主要包括 Welford Online 算法（单次遍历计算均值和方差），以及基于它的中心矩 [`Moments`]。
//!
//! # 核心概念
//!
//! - **Welford Online 算法**: 单次遍历计算均值和方差的在线算法
//! - **总体方差**: 分母为样本数量 `n`（而不是 `n - 1`）
//! - **中心矩**: 偏度与峰度所需的三阶、四阶中心矩

use serde::{Deserialize, Serialize};

/// [Welford Online](https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Welford's_online_algorithm)
/// 算法集合，用于单次遍历计算运行中的值，如均值和方差。
///
/// # 使用示例
///
/// ```rust
/// use riskkit::statistic::algorithm::welford_online;
///
/// let mut mean = 0.0;
/// let mut m = 0.0;
/// let mut count = 0.0;
///
/// for value in [10.0, 100.0, -10.0] {
///     count += 1.0;
///     let new_mean = welford_online::calculate_mean(mean, value, count);
///     m = welford_online::calculate_recurrence_relation_m(m, mean, value, new_mean);
///     mean = new_mean;
/// }
///
/// let variance = welford_online::calculate_population_variance(m, count);
/// assert!((variance - 2288.888888888889).abs() < 1e-9);
/// ```
pub mod welford_online {
    /// 计算下一个均值。
    ///
    /// ## 公式
    ///
    /// `new_mean = prev_mean + (next_value - prev_mean) / count`
    pub fn calculate_mean<T>(mut prev_mean: T, next_value: T, count: T) -> T
    where
        T: Copy + std::ops::Sub<Output = T> + std::ops::Div<Output = T> + std::ops::AddAssign,
    {
        prev_mean += (next_value - prev_mean) / count;
        prev_mean
    }

    /// 计算下一个 Welford Online 递推关系 M（离差平方和）。
    ///
    /// ## 公式
    ///
    /// `M = prev_m + (new_value - prev_mean) * (new_value - new_mean)`
    pub fn calculate_recurrence_relation_m(
        prev_m: f64,
        prev_mean: f64,
        new_value: f64,
        new_mean: f64,
    ) -> f64 {
        prev_m + ((new_value - prev_mean) * (new_value - new_mean))
    }

    /// 使用 Welford Online 递推关系 M 计算有偏"总体"方差（分母为 `count`）。
    ///
    /// 当 `count < 1` 时没有观测值，返回 `NaN`。
    pub fn calculate_population_variance(recurrence_relation_m: f64, count: f64) -> f64 {
        match count < 1.0 {
            true => f64::NAN,
            false => recurrence_relation_m / count,
        }
    }
}

/// 数据集的中心矩，忽略缺失值（`NaN`）。
///
/// 第一遍使用 Welford Online 算法计算均值和二阶离差平方和，第二遍以最终均值
/// 计算三阶、四阶离差和。
///
/// ## 退化情况
///
/// 没有观测值或总体方差为零时，[`skewness`](Moments::skewness) 与
/// [`kurtosis`](Moments::kurtosis) 返回 `NaN`（`0 / 0`），不会 panic。
#[derive(Debug, Copy, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Moments {
    /// 非缺失观测值数量。
    pub count: usize,
    /// 均值（没有观测值时为 `NaN`）。
    pub mean: f64,
    /// 二阶离差和 `Σ(x - μ)²`。
    pub m2: f64,
    /// 三阶离差和 `Σ(x - μ)³`。
    pub m3: f64,
    /// 四阶离差和 `Σ(x - μ)⁴`。
    pub m4: f64,
}

impl Moments {
    /// 计算 `values` 中非缺失值的中心矩。
    pub fn calculate(values: &[f64]) -> Self {
        let (count, mean, m2) = values
            .iter()
            .copied()
            .filter(|value| !value.is_nan())
            .fold((0usize, 0.0, 0.0), |(count, mean, m), value| {
                let count = count + 1;
                let new_mean = welford_online::calculate_mean(mean, value, count as f64);
                let m = welford_online::calculate_recurrence_relation_m(m, mean, value, new_mean);
                (count, new_mean, m)
            });

        if count == 0 {
            return Self {
                count,
                mean: f64::NAN,
                m2: 0.0,
                m3: 0.0,
                m4: 0.0,
            };
        }

        let (m3, m4) = values
            .iter()
            .filter(|value| !value.is_nan())
            .map(|value| value - mean)
            .fold((0.0, 0.0), |(m3, m4), deviation| {
                let squared = deviation * deviation;
                (m3 + squared * deviation, m4 + squared * squared)
            });

        Self {
            count,
            mean,
            m2,
            m3,
            m4,
        }
    }

    /// 总体方差（分母为 `count`）。
    pub fn population_variance(&self) -> f64 {
        welford_online::calculate_population_variance(self.m2, self.count as f64)
    }

    /// 总体标准差（分母为 `count`）。
    pub fn population_std_dev(&self) -> f64 {
        self.population_variance().sqrt()
    }

    /// 总体偏度：`mean((x - μ)³) / σ³`。
    pub fn skewness(&self) -> f64 {
        self.standardised(self.m3, 3)
    }

    /// 原始（非超额）峰度：`mean((x - μ)⁴) / σ⁴`。
    pub fn kurtosis(&self) -> f64 {
        self.standardised(self.m4, 4)
    }

    fn standardised(&self, central_sum: f64, order: i32) -> f64 {
        let variance = self.population_variance();

        // 零方差的离差恒为 0，结果为 0 / 0
        if self.count == 0 || variance == 0.0 {
            return f64::NAN;
        }

        (central_sum / self.count as f64) / variance.sqrt().powi(order)
    }
}
