//! Boundary traits for the collaborators a characterization run drives.
//!
//! The puzzle representation, the search procedure, and state randomization
//! all live outside this workspace. They are reached only through the traits
//! below, so any solver with a goal-depth/timeout contract can be measured.

use std::time::{Duration, Instant};

use crate::error::SolverError;

/// Result of one solver invocation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome<M> {
    /// The solver returned a move sequence before its deadline.
    Solved(Vec<M>),
    /// The deadline passed before the solver produced an answer.
    TimedOut,
}

impl<M> SolveOutcome<M> {
    /// Number of moves in the solution, or `None` on timeout.
    pub fn move_count(&self) -> Option<usize> {
        match self {
            Self::Solved(moves) => Some(moves.len()),
            Self::TimedOut => None,
        }
    }
}

/// A timed search procedure over states of type `S`.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use solvebench_core::{SolveOutcome, Solver, SolverError};
///
/// struct Identity;
///
/// impl Solver<Vec<u8>> for Identity {
///     type Move = ();
///
///     fn solve(
///         &mut self,
///         state: &Vec<u8>,
///         _goal_depth: u32,
///         _timeout: Duration,
///     ) -> Result<SolveOutcome<()>, SolverError> {
///         Ok(SolveOutcome::Solved(vec![(); state.len()]))
///     }
/// }
///
/// let outcome = Identity.solve(&vec![1, 2, 3], 5, Duration::from_secs(1)).unwrap();
/// assert_eq!(outcome.move_count(), Some(3));
/// ```
pub trait Solver<S> {
    /// Move type of the returned sequence. Only its count is measured.
    type Move;

    /// Searches for a move sequence of at most `goal_depth` moves.
    ///
    /// Implementations should give up after `timeout` and report
    /// [`SolveOutcome::TimedOut`]. Any other failure is a [`SolverError`].
    fn solve(
        &mut self,
        state: &S,
        goal_depth: u32,
        timeout: Duration,
    ) -> Result<SolveOutcome<Self::Move>, SolverError>;
}

impl<S, T: Solver<S> + ?Sized> Solver<S> for &mut T {
    type Move = T::Move;

    fn solve(
        &mut self,
        state: &S,
        goal_depth: u32,
        timeout: Duration,
    ) -> Result<SolveOutcome<Self::Move>, SolverError> {
        (**self).solve(state, goal_depth, timeout)
    }
}

/// Source of uniformly scrambled states.
///
/// Any `FnMut() -> S` closure is a randomizer.
pub trait Randomizer<S> {
    fn random_state(&mut self) -> S;
}

impl<S, F: FnMut() -> S> Randomizer<S> for F {
    fn random_state(&mut self) -> S {
        self()
    }
}

/// Monotonic time source used to measure solver calls.
pub trait Clock {
    /// Time elapsed since an arbitrary, fixed origin.
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}
