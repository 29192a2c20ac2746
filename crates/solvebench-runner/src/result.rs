//! Per-depth and whole-run result types.

use std::time::Duration;

use solvebench_core::{BenchError, Result, Sample, SequenceStatistics};

/// Aggregated outcome of all trials at one goal depth.
///
/// Immutable once produced by the sampler.
#[derive(Debug, Clone)]
pub struct DepthResult {
    /// Goal depth the trials asked for.
    pub goal_depth: u32,
    /// Solve time statistics in seconds, over every trial.
    pub time_stats: SequenceStatistics,
    /// Solution length statistics over trials that produced a solution.
    ///
    /// `None` when every trial timed out.
    pub move_stats: Option<SequenceStatistics>,
    /// Fraction of trials whose solution was no longer than the goal depth.
    pub goal_hit_rate: f64,
    /// Number of trials that timed out.
    pub timeout_count: usize,
    /// Wall time spent sampling this depth.
    pub duration: Duration,
    /// Every trial, in the order it ran.
    pub samples: Vec<Sample>,
}

impl DepthResult {
    /// Summarizes the samples of one depth.
    ///
    /// Timed-out trials contribute their elapsed time to `time_stats`, are
    /// left out of `move_stats`, and count as goal misses.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidInput`] if `samples` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use solvebench_core::Sample;
    /// use solvebench_runner::DepthResult;
    ///
    /// let ms = Duration::from_millis;
    /// let samples = vec![
    ///     Sample::solved(20, ms(10), 19),
    ///     Sample::solved(20, ms(30), 21),
    ///     Sample::timed_out(20, ms(1000)),
    /// ];
    ///
    /// let result = DepthResult::from_samples(20, samples, ms(1040)).unwrap();
    /// assert_eq!(result.sample_count(), 3);
    /// assert_eq!(result.timeout_count, 1);
    /// assert_eq!(result.move_stats.unwrap().mean, 20.0);
    /// assert!((result.goal_hit_rate - 1.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn from_samples(goal_depth: u32, samples: Vec<Sample>, duration: Duration) -> Result<Self> {
        if samples.is_empty() {
            return Err(BenchError::invalid(format!(
                "no samples collected for goal depth {goal_depth}"
            )));
        }

        let times: Vec<f64> = samples.iter().map(Sample::elapsed_seconds).collect();
        let lengths: Vec<f64> = samples
            .iter()
            .filter_map(Sample::solution_length)
            .map(f64::from)
            .collect();

        let time_stats = SequenceStatistics::from_values(&times)?;
        let move_stats = if lengths.is_empty() {
            None
        } else {
            Some(SequenceStatistics::from_values(&lengths)?)
        };

        let hits = samples.iter().filter(|s| s.hit_goal()).count();
        let timeout_count = samples.iter().filter(|s| s.is_timed_out()).count();

        Ok(Self {
            goal_depth,
            time_stats,
            move_stats,
            goal_hit_rate: hits as f64 / samples.len() as f64,
            timeout_count,
            duration,
            samples,
        })
    }

    /// Number of trials aggregated into this result.
    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    /// Number of trials that produced a solution.
    pub fn solved_count(&self) -> usize {
        self.samples.len() - self.timeout_count
    }
}

/// Projected completion time at one goal depth.
///
/// Derived estimate, not a measurement: solver think time plus an assumed
/// constant execution time per move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeTime {
    pub goal_depth: u32,
    /// `move_stats.mean * seconds_per_move + time_stats.mean`, in seconds.
    pub combined_mean: Option<f64>,
    /// `move_stats.max * seconds_per_move + time_stats.max`, in seconds.
    pub combined_worst_case: Option<f64>,
}

impl CompositeTime {
    /// Projects completion time for one depth.
    ///
    /// Both values are `None` if the depth has no solved trials.
    pub fn for_depth(result: &DepthResult, seconds_per_move: f64) -> Self {
        let time = &result.time_stats;
        let (combined_mean, combined_worst_case) = match &result.move_stats {
            Some(moves) => (
                Some(moves.mean * seconds_per_move + time.mean),
                Some(moves.max * seconds_per_move + time.max),
            ),
            None => (None, None),
        };

        Self {
            goal_depth: result.goal_depth,
            combined_mean,
            combined_worst_case,
        }
    }
}

/// How a characterization run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunCompletion {
    /// Every depth in the range was sampled.
    Complete,
    /// The stop condition fired while sampling `goal_depth`.
    ///
    /// The trials already run at that depth are discarded; only fully
    /// sampled depths appear in the report.
    Interrupted {
        goal_depth: u32,
        completed_trials: usize,
    },
}

/// Terminal output of a characterization run. Read-only once built.
#[derive(Debug, Clone)]
pub struct CharacterizationReport {
    /// Results in ascending goal depth order.
    pub depth_results: Vec<DepthResult>,
    /// Composite projections, parallel to `depth_results`.
    pub composite_times: Vec<CompositeTime>,
    /// Wall time of the entire run.
    pub total_duration: Duration,
    pub completion: RunCompletion,
    /// Trials requested per depth.
    pub iteration_count: usize,
    /// Per-trial solver timeout.
    pub timeout: Duration,
    /// Assumed execution time of one move.
    pub seconds_per_move: f64,
    /// Reference completion time the composite estimates are compared with.
    pub reference_time_seconds: Option<f64>,
}

impl CharacterizationReport {
    /// Computes composite projections for `depth_results`.
    pub fn new(
        depth_results: Vec<DepthResult>,
        total_duration: Duration,
        completion: RunCompletion,
        iteration_count: usize,
        timeout: Duration,
        seconds_per_move: f64,
    ) -> Self {
        let composite_times = depth_results
            .iter()
            .map(|r| CompositeTime::for_depth(r, seconds_per_move))
            .collect();

        Self {
            depth_results,
            composite_times,
            total_duration,
            completion,
            iteration_count,
            timeout,
            seconds_per_move,
            reference_time_seconds: None,
        }
    }

    /// Sets the reference completion time.
    pub fn with_reference_time_seconds(mut self, seconds: Option<f64>) -> Self {
        self.reference_time_seconds = seconds;
        self
    }

    /// True if the run stopped before every depth was sampled.
    pub fn is_partial(&self) -> bool {
        matches!(self.completion, RunCompletion::Interrupted { .. })
    }

    /// Number of fully sampled depths.
    pub fn depth_count(&self) -> usize {
        self.depth_results.len()
    }

    /// Sampled goal depths, ascending.
    pub fn goal_depths(&self) -> impl Iterator<Item = u32> + '_ {
        self.depth_results.iter().map(|r| r.goal_depth)
    }

    /// Result for one goal depth, if it was sampled.
    pub fn depth(&self, goal_depth: u32) -> Option<&DepthResult> {
        self.depth_results
            .iter()
            .find(|r| r.goal_depth == goal_depth)
    }

    /// Composite projection for one goal depth, if it was sampled.
    pub fn composite(&self, goal_depth: u32) -> Option<&CompositeTime> {
        self.composite_times
            .iter()
            .find(|c| c.goal_depth == goal_depth)
    }

    /// Total number of trials across all reported depths.
    pub fn total_trials(&self) -> usize {
        self.depth_results.iter().map(DepthResult::sample_count).sum()
    }

    /// Whether a composite mean beats the reference time.
    ///
    /// `None` if no reference is set or the depth has no composite mean.
    pub fn beats_reference(&self, composite: &CompositeTime) -> Option<bool> {
        let reference = self.reference_time_seconds?;
        composite.combined_mean.map(|mean| mean < reference)
    }

    /// Depth with the lowest composite mean.
    pub fn fastest_depth(&self) -> Option<&CompositeTime> {
        self.composite_times
            .iter()
            .filter(|c| c.combined_mean.is_some())
            .min_by(|a, b| {
                let a = a.combined_mean.unwrap_or(f64::INFINITY);
                let b = b.combined_mean.unwrap_or(f64::INFINITY);
                a.total_cmp(&b)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn depth(goal_depth: u32, samples: Vec<Sample>) -> DepthResult {
        DepthResult::from_samples(goal_depth, samples, ms(0)).unwrap()
    }

    #[test]
    fn test_empty_samples_invalid() {
        let err = DepthResult::from_samples(5, Vec::new(), ms(0)).unwrap_err();
        assert!(matches!(err, BenchError::InvalidInput(_)));
    }

    #[test]
    fn test_all_timed_out() {
        let result = depth(5, vec![Sample::timed_out(5, ms(1000)); 4]);
        assert_eq!(result.goal_hit_rate, 0.0);
        assert_eq!(result.timeout_count, 4);
        assert_eq!(result.solved_count(), 0);
        assert!(result.move_stats.is_none());
        assert_eq!(result.time_stats.mean, 1.0);

        let composite = CompositeTime::for_depth(&result, 0.5);
        assert_eq!(composite.combined_mean, None);
        assert_eq!(composite.combined_worst_case, None);
    }

    #[test]
    fn test_timeouts_excluded_from_moves_only() {
        let result = depth(
            20,
            vec![
                Sample::solved(20, ms(100), 18),
                Sample::timed_out(20, ms(900)),
            ],
        );
        let moves = result.move_stats.unwrap();
        assert_eq!(moves.min, 18.0);
        assert_eq!(moves.max, 18.0);
        assert!((result.time_stats.mean - 0.5).abs() < 1e-12);
        assert_eq!(result.goal_hit_rate, 0.5);
    }

    #[test]
    fn test_composite_time() {
        let result = depth(
            20,
            vec![
                Sample::solved(20, ms(100), 18),
                Sample::solved(20, ms(300), 22),
            ],
        );
        let composite = CompositeTime::for_depth(&result, 0.5);
        assert!((composite.combined_mean.unwrap() - (20.0 * 0.5 + 0.2)).abs() < 1e-12);
        assert!((composite.combined_worst_case.unwrap() - (22.0 * 0.5 + 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_report_lookup_and_reference() {
        let fast = depth(20, vec![Sample::solved(20, ms(100), 20)]);
        let slow = depth(21, vec![Sample::solved(21, ms(100), 10)]);
        let report = CharacterizationReport::new(
            vec![fast, slow],
            ms(200),
            RunCompletion::Complete,
            1,
            Duration::from_secs(1),
            0.25,
        )
        .with_reference_time_seconds(Some(3.0));

        assert!(!report.is_partial());
        assert_eq!(report.goal_depths().collect::<Vec<_>>(), vec![20, 21]);
        assert_eq!(report.total_trials(), 2);
        assert!(report.depth(22).is_none());

        let c20 = *report.composite(20).unwrap();
        let c21 = *report.composite(21).unwrap();
        assert_eq!(report.beats_reference(&c20), Some(false));
        assert_eq!(report.beats_reference(&c21), Some(true));
        assert_eq!(report.fastest_depth().unwrap().goal_depth, 21);
    }
}
