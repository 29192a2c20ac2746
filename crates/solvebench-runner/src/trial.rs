//! Single timed solver invocation.

use std::time::Duration;

use tracing::trace;

use solvebench_core::{
    BenchError, Clock, Result, Sample, SolveOutcome, Solver, SolverError, SystemClock,
};

/// Runs the external solver once and measures it.
///
/// Elapsed time is read from the clock `C` around the solver call, so a
/// timed-out trial still carries the time it cost.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use solvebench_core::{SolveOutcome, Solver, SolverError};
/// use solvebench_runner::TrialRunner;
///
/// struct ThreeMoves;
///
/// impl Solver<u64> for ThreeMoves {
///     type Move = u8;
///
///     fn solve(&mut self, _: &u64, _: u32, _: Duration) -> Result<SolveOutcome<u8>, SolverError> {
///         Ok(SolveOutcome::Solved(vec![0, 1, 2]))
///     }
/// }
///
/// let mut runner = TrialRunner::new(ThreeMoves);
/// let sample = runner.run_trial(&7, 5, Duration::from_secs(1)).unwrap();
/// assert_eq!(sample.solution_length(), Some(3));
/// assert!(sample.hit_goal());
/// ```
#[derive(Debug)]
pub struct TrialRunner<V, C = SystemClock> {
    solver: V,
    clock: C,
}

impl<V> TrialRunner<V, SystemClock> {
    /// Creates a runner measuring with the system clock.
    pub fn new(solver: V) -> Self {
        Self::with_clock(solver, SystemClock::new())
    }
}

impl<V, C: Clock> TrialRunner<V, C> {
    /// Creates a runner measuring with the given clock.
    pub fn with_clock(solver: V, clock: C) -> Self {
        Self { solver, clock }
    }

    /// Runs one trial against `state`.
    ///
    /// # Errors
    ///
    /// - [`BenchError::InvalidInput`] if `timeout` is zero.
    /// - [`BenchError::Solver`] if the solver fails for any reason other
    ///   than its deadline passing.
    pub fn run_trial<S>(&mut self, state: &S, goal_depth: u32, timeout: Duration) -> Result<Sample>
    where
        V: Solver<S>,
    {
        if timeout.is_zero() {
            return Err(BenchError::invalid("trial timeout must be positive"));
        }

        let start = self.clock.now();
        let outcome = self.solver.solve(state, goal_depth, timeout);
        let elapsed = self.clock.now().saturating_sub(start);

        let sample = match outcome? {
            SolveOutcome::Solved(moves) => {
                let length = u32::try_from(moves.len()).map_err(|_| {
                    SolverError::new(format!("solution of {} moves is implausible", moves.len()))
                })?;
                Sample::solved(goal_depth, elapsed, length)
            }
            SolveOutcome::TimedOut => Sample::timed_out(goal_depth, elapsed),
        };

        trace!(
            event = "trial",
            goal_depth = goal_depth,
            elapsed_us = elapsed.as_micros() as u64,
            timed_out = sample.is_timed_out(),
        );

        Ok(sample)
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn solver(&self) -> &V {
        &self.solver
    }

    pub fn into_solver(self) -> V {
        self.solver
    }
}
