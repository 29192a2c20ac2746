//! Characterization runner.

use std::marker::PhantomData;

use tracing::{info, warn};

use solvebench_config::{CharacterizationConfig, ConfigError};
use solvebench_core::{
    BenchError, Clock, NeverStop, Randomizer, Result, ShouldStop, Solver, SystemClock,
};

use crate::result::{CharacterizationReport, RunCompletion};
use crate::sampler::DepthSampler;
use crate::trial::TrialRunner;

/// Samples a solver over a closed range of goal depths.
///
/// Depths are sampled one at a time in ascending order; each depth gets
/// `iteration_count` trials on fresh random states. Collaborators are stored
/// as concrete type parameters rather than trait objects.
///
/// # Type Parameters
///
/// * `S` - The puzzle state type
/// * `V` - The solver: `Solver<S>`
/// * `R` - The randomizer: `Randomizer<S>`
/// * `C` - The clock used to time trials
/// * `T` - The stop condition polled before each trial
pub struct Characterization<S, V, R, C = SystemClock, T = NeverStop>
where
    V: Solver<S>,
    R: Randomizer<S>,
    C: Clock,
    T: ShouldStop,
{
    config: CharacterizationConfig,
    runner: TrialRunner<V, C>,
    randomizer: R,
    stop: T,
    _phantom: PhantomData<fn() -> S>,
}

impl<S, V, R> Characterization<S, V, R>
where
    V: Solver<S>,
    R: Randomizer<S>,
{
    /// Creates a characterization timed by the system clock that never stops early.
    pub fn new(config: CharacterizationConfig, solver: V, randomizer: R) -> Self {
        Self {
            config,
            runner: TrialRunner::new(solver),
            randomizer,
            stop: NeverStop,
            _phantom: PhantomData,
        }
    }
}

impl<S, V, R, C, T> Characterization<S, V, R, C, T>
where
    V: Solver<S>,
    R: Randomizer<S>,
    C: Clock,
    T: ShouldStop,
{
    /// Replaces the clock used to time trials.
    pub fn with_clock<C2: Clock>(self, clock: C2) -> Characterization<S, V, R, C2, T> {
        Characterization {
            config: self.config,
            runner: TrialRunner::with_clock(self.runner.into_solver(), clock),
            randomizer: self.randomizer,
            stop: self.stop,
            _phantom: PhantomData,
        }
    }

    /// Replaces the stop condition polled before each trial.
    pub fn with_stop<T2: ShouldStop>(self, stop: T2) -> Characterization<S, V, R, C, T2> {
        Characterization {
            config: self.config,
            runner: self.runner,
            randomizer: self.randomizer,
            stop,
            _phantom: PhantomData,
        }
    }

    pub fn config(&self) -> &CharacterizationConfig {
        &self.config
    }

    pub fn solver(&self) -> &V {
        self.runner.solver()
    }

    /// Runs every depth and returns the report.
    ///
    /// An interruption is not an error: sampling halts before the next
    /// trial and the report holds the depths completed so far, marked
    /// partial.
    ///
    /// # Errors
    ///
    /// - [`BenchError::InvalidInput`] if the configuration is invalid; no
    ///   trial is run.
    /// - [`BenchError::Solver`] on the first solver failure.
    pub fn run(&mut self) -> Result<CharacterizationReport> {
        self.config.validate().map_err(invalid_input)?;

        let timeout = self.config.timeout();
        let sampler = DepthSampler::new(self.config.iteration_count, timeout)?;

        info!(
            event = "characterize_start",
            min_depth = self.config.min_depth,
            max_depth = self.config.max_depth,
            iteration_count = self.config.iteration_count as u64,
            timeout_ms = timeout.as_millis() as u64,
        );

        let started = self.runner.clock().now();
        let mut depth_results = Vec::new();
        let mut completion = RunCompletion::Complete;

        for goal_depth in self.config.depths() {
            let sampled = sampler.sample::<S, _, _, _, _>(
                goal_depth,
                &mut self.randomizer,
                &mut self.runner,
                &self.stop,
            );
            match sampled {
                Ok(result) => depth_results.push(result),
                Err(BenchError::Interrupted {
                    completed,
                    requested,
                }) => {
                    warn!(
                        event = "interrupted",
                        goal_depth = goal_depth,
                        completed = completed as u64,
                        requested = requested as u64,
                    );
                    completion = RunCompletion::Interrupted {
                        goal_depth,
                        completed_trials: completed,
                    };
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        let total_duration = self.runner.clock().now().saturating_sub(started);

        info!(
            event = "characterize_end",
            depth_count = depth_results.len() as u64,
            duration_ms = total_duration.as_millis() as u64,
            partial = !matches!(completion, RunCompletion::Complete),
        );

        Ok(CharacterizationReport::new(
            depth_results,
            total_duration,
            completion,
            self.config.iteration_count,
            timeout,
            self.config.seconds_per_move,
        )
        .with_reference_time_seconds(self.config.reference_time_seconds))
    }
}

fn invalid_input(err: ConfigError) -> BenchError {
    match err {
        ConfigError::Invalid(msg) => BenchError::InvalidInput(msg),
        other => BenchError::InvalidInput(other.to_string()),
    }
}

/// Characterizes `solver` over the configured depth range.
///
/// Convenience wrapper around [`Characterization`] using the system clock.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use solvebench_config::CharacterizationConfig;
/// use solvebench_core::{NeverStop, SolveOutcome, Solver, SolverError};
/// use solvebench_runner::characterize;
///
/// struct Instant3;
///
/// impl Solver<u32> for Instant3 {
///     type Move = ();
///     fn solve(&mut self, _: &u32, _: u32, _: Duration) -> Result<SolveOutcome<()>, SolverError> {
///         Ok(SolveOutcome::Solved(vec![(); 3]))
///     }
/// }
///
/// let config = CharacterizationConfig::new(4, 0.5).with_depth_range(2, 4);
/// let report = characterize(&config, Instant3, || 0u32, NeverStop).unwrap();
///
/// assert_eq!(report.goal_depths().collect::<Vec<_>>(), vec![2, 3, 4]);
/// assert_eq!(report.depth(2).unwrap().goal_hit_rate, 0.0);
/// assert_eq!(report.depth(3).unwrap().goal_hit_rate, 1.0);
/// ```
pub fn characterize<S, V, R, T>(
    config: &CharacterizationConfig,
    solver: V,
    randomizer: R,
    stop: T,
) -> Result<CharacterizationReport>
where
    V: Solver<S>,
    R: Randomizer<S>,
    T: ShouldStop,
{
    Characterization::new(config.clone(), solver, randomizer)
        .with_stop(stop)
        .run()
}

/// Builder for creating characterizations with a fluent API.
///
/// # Example
///
/// ```
/// use solvebench_runner::CharacterizationBuilder;
///
/// let builder = CharacterizationBuilder::new(200, 0.15)
///     .with_depth_range(18, 22)
///     .with_timeout_seconds(0.5)
///     .with_random_seed(3);
///
/// assert_eq!(builder.config().depth_count(), 5);
/// assert_eq!(builder.config().random_seed, Some(3));
/// ```
#[derive(Debug, Clone)]
pub struct CharacterizationBuilder {
    config: CharacterizationConfig,
}

impl CharacterizationBuilder {
    /// Creates a builder with default depth range and timeout.
    pub fn new(iteration_count: usize, seconds_per_move: f64) -> Self {
        Self {
            config: CharacterizationConfig::new(iteration_count, seconds_per_move),
        }
    }

    /// Starts from an existing configuration, e.g. one loaded from a file.
    pub fn from_config(config: CharacterizationConfig) -> Self {
        Self { config }
    }

    /// Sets the inclusive goal depth range.
    pub fn with_depth_range(mut self, min_depth: u32, max_depth: u32) -> Self {
        self.config = self.config.with_depth_range(min_depth, max_depth);
        self
    }

    /// Sets the per-trial timeout.
    pub fn with_timeout_seconds(mut self, seconds: f64) -> Self {
        self.config = self.config.with_timeout_seconds(seconds);
        self
    }

    /// Sets the randomizer seed recorded in the configuration.
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.config = self.config.with_random_seed(seed);
        self
    }

    /// Sets the reference completion time.
    pub fn with_reference_time_seconds(mut self, seconds: f64) -> Self {
        self.config = self.config.with_reference_time_seconds(seconds);
        self
    }

    pub fn config(&self) -> &CharacterizationConfig {
        &self.config
    }

    /// Builds the characterization with the given collaborators.
    pub fn build<S, V, R>(self, solver: V, randomizer: R) -> Characterization<S, V, R>
    where
        V: Solver<S>,
        R: Randomizer<S>,
    {
        Characterization::new(self.config, solver, randomizer)
    }
}
