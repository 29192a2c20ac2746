//! Summary statistics over a finite sample sequence.

use std::fmt;

use crate::error::{BenchError, Result};

/// Min, max, median, mean and population standard deviation of a sequence.
///
/// Always satisfies `min <= median <= max`, `min <= mean <= max` and
/// `stddev >= 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceStatistics {
    pub min: f64,
    pub max: f64,
    pub median: f64,
    pub mean: f64,
    pub stddev: f64,
}

impl SequenceStatistics {
    /// Summarizes a non-empty sequence of finite values.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidInput`] if `values` is empty or contains
    /// NaN or an infinity.
    ///
    /// # Example
    ///
    /// ```
    /// use solvebench_core::SequenceStatistics;
    ///
    /// let stats = SequenceStatistics::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 4.0);
    /// assert_eq!(stats.median, 2.5);
    /// assert_eq!(stats.mean, 2.5);
    ///
    /// assert!(SequenceStatistics::from_values(&[]).is_err());
    /// ```
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(BenchError::invalid(
                "cannot summarize an empty sample sequence",
            ));
        }
        if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
            return Err(BenchError::invalid(format!(
                "sample sequence contains non-finite value {bad}"
            )));
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n = sorted.len();
        let min = sorted[0];
        let max = sorted[n - 1];

        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        // Rounding in the sum can push a constant sequence's mean just
        // outside [min, max].
        let sum: f64 = values.iter().sum();
        let mean = (sum / n as f64).clamp(min, max);

        let squared_deviations: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        let stddev = (squared_deviations / n as f64).sqrt();

        Ok(Self {
            min,
            max,
            median,
            mean,
            stddev,
        })
    }

    /// Multiplies every statistic by `factor`, e.g. seconds to milliseconds.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            min: self.min * factor,
            max: self.max * factor,
            median: self.median * factor,
            mean: self.mean * factor,
            stddev: self.stddev * factor.abs(),
        }
    }

    /// Renders `min=.., max=.., median=.., mean=.., stddev=..` with a unit
    /// suffix, values rounded to three decimals.
    ///
    /// # Example
    ///
    /// ```
    /// use solvebench_core::SequenceStatistics;
    ///
    /// let stats = SequenceStatistics::from_values(&[0.0125]).unwrap();
    /// assert_eq!(
    ///     stats.scaled(1000.0).summary("ms").to_string(),
    ///     "min=12.500ms, max=12.500ms, median=12.500ms, mean=12.500ms, stddev=0.000ms",
    /// );
    /// ```
    pub fn summary<'a>(&'a self, unit: &'a str) -> StatisticsSummary<'a> {
        StatisticsSummary { stats: self, unit }
    }
}

/// Display adapter returned by [`SequenceStatistics::summary`].
pub struct StatisticsSummary<'a> {
    stats: &'a SequenceStatistics,
    unit: &'a str,
}

impl fmt::Display for StatisticsSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.stats;
        let u = self.unit;
        write!(
            f,
            "min={:.3}{u}, max={:.3}{u}, median={:.3}{u}, mean={:.3}{u}, stddev={:.3}{u}",
            s.min, s.max, s.median, s.mean, s.stddev
        )
    }
}

#[cfg(test)]
mod tests;
