//! Repeated trials at a fixed goal depth.

use std::time::Duration;

use tracing::{debug, info};

use solvebench_core::{BenchError, Clock, Randomizer, Result, Sample, ShouldStop, Solver};

use crate::result::DepthResult;
use crate::trial::TrialRunner;

/// Running aggregates over the trials of one depth.
///
/// Threaded through the sampling loop as a fold so that progress can be
/// reported after every trial without rescanning the samples.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningTotals {
    /// Trials recorded so far.
    pub trials: usize,
    /// Sum of elapsed time over all trials.
    pub elapsed: Duration,
    /// Sum of solution lengths over solved trials.
    pub moves: u64,
    /// Trials that produced a solution.
    pub solved: usize,
    /// Trials whose solution met the goal depth.
    pub goal_hits: usize,
    /// Trials that timed out.
    pub timeouts: usize,
}

impl RunningTotals {
    /// Folds one sample into the totals.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use solvebench_core::Sample;
    /// use solvebench_runner::RunningTotals;
    ///
    /// let ms = Duration::from_millis;
    /// let totals = RunningTotals::default()
    ///     .record(&Sample::solved(20, ms(10), 18))
    ///     .record(&Sample::solved(20, ms(30), 22))
    ///     .record(&Sample::timed_out(20, ms(80)));
    ///
    /// assert_eq!(totals.trials, 3);
    /// assert_eq!(totals.mean_elapsed(), ms(40));
    /// assert_eq!(totals.mean_moves(), Some(20.0));
    /// assert!((totals.goal_hit_rate() - 1.0 / 3.0).abs() < 1e-12);
    /// ```
    pub fn record(mut self, sample: &Sample) -> Self {
        self.trials += 1;
        self.elapsed += sample.elapsed;
        match sample.solution_length() {
            Some(length) => {
                self.solved += 1;
                self.moves += u64::from(length);
            }
            None => self.timeouts += 1,
        }
        if sample.hit_goal() {
            self.goal_hits += 1;
        }
        self
    }

    /// Mean elapsed time per trial, zero before the first trial.
    pub fn mean_elapsed(&self) -> Duration {
        match u32::try_from(self.trials) {
            Ok(0) => Duration::ZERO,
            Ok(trials) => self.elapsed / trials,
            Err(_) => self.elapsed.div_f64(self.trials as f64),
        }
    }

    /// Mean solution length over solved trials.
    pub fn mean_moves(&self) -> Option<f64> {
        if self.solved == 0 {
            None
        } else {
            Some(self.moves as f64 / self.solved as f64)
        }
    }

    /// Fraction of recorded trials that hit the goal, zero before the first trial.
    pub fn goal_hit_rate(&self) -> f64 {
        if self.trials == 0 {
            0.0
        } else {
            self.goal_hits as f64 / self.trials as f64
        }
    }
}

/// Drives a fixed number of independent trials at one goal depth.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use solvebench_runner::DepthSampler;
///
/// let sampler = DepthSampler::new(100, Duration::from_secs(1)).unwrap();
/// assert_eq!(sampler.iteration_count(), 100);
///
/// assert!(DepthSampler::new(0, Duration::from_secs(1)).is_err());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DepthSampler {
    iteration_count: usize,
    timeout: Duration,
}

impl DepthSampler {
    /// Creates a sampler.
    ///
    /// # Errors
    ///
    /// Returns [`BenchError::InvalidInput`] if `iteration_count` is zero or
    /// `timeout` is zero.
    pub fn new(iteration_count: usize, timeout: Duration) -> Result<Self> {
        if iteration_count == 0 {
            return Err(BenchError::invalid("iteration_count must be at least 1"));
        }
        if timeout.is_zero() {
            return Err(BenchError::invalid("trial timeout must be positive"));
        }
        Ok(Self {
            iteration_count,
            timeout,
        })
    }

    pub fn iteration_count(&self) -> usize {
        self.iteration_count
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Runs every trial for `goal_depth` and summarizes them.
    ///
    /// Each trial draws a fresh state from `randomizer`. `stop` is polled
    /// before each trial.
    ///
    /// # Errors
    ///
    /// - [`BenchError::Interrupted`] if `stop` fired; trials already run at
    ///   this depth are dropped.
    /// - [`BenchError::Solver`] on the first solver failure.
    pub fn sample<S, V, C, R, T>(
        &self,
        goal_depth: u32,
        randomizer: &mut R,
        runner: &mut TrialRunner<V, C>,
        stop: &T,
    ) -> Result<DepthResult>
    where
        V: Solver<S>,
        C: Clock,
        R: Randomizer<S> + ?Sized,
        T: ShouldStop + ?Sized,
    {
        info!(event = "depth_start", goal_depth = goal_depth);

        let started = runner.clock().now();
        let mut samples = Vec::new();
        let mut totals = RunningTotals::default();

        for trial in 0..self.iteration_count {
            if stop.should_stop() {
                return Err(BenchError::Interrupted {
                    completed: trial,
                    requested: self.iteration_count,
                });
            }

            let state = randomizer.random_state();
            let sample = runner.run_trial(&state, goal_depth, self.timeout)?;
            totals = totals.record(&sample);
            samples.push(sample);

            debug!(
                event = "progress",
                goal_depth = goal_depth,
                trial = (trial + 1) as u64,
                trial_count = self.iteration_count as u64,
                mean_time_ms = totals.mean_elapsed().as_secs_f64() * 1000.0,
                mean_moves = totals.mean_moves().unwrap_or(f64::NAN),
                goal_hit_pct = totals.goal_hit_rate() * 100.0,
                timeouts = totals.timeouts as u64,
            );
        }

        let duration = runner.clock().now().saturating_sub(started);
        let result = DepthResult::from_samples(goal_depth, samples, duration)?;

        let time_ms = result.time_stats.scaled(1000.0);
        let move_summary = match &result.move_stats {
            Some(stats) => stats.summary("").to_string(),
            None => "n/a (every trial timed out)".to_string(),
        };
        info!(
            event = "depth_end",
            goal_depth = goal_depth,
            duration_ms = duration.as_millis() as u64,
            time_summary = %time_ms.summary("ms"),
            move_summary = %move_summary,
            goal_hit_pct = result.goal_hit_rate * 100.0,
            timeouts = result.timeout_count as u64,
        );

        Ok(result)
    }
}
