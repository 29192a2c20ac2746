//! Error types for solvebench

use thiserror::Error;

/// Unexpected failure reported by a solver capability.
///
/// A timeout is not a `SolverError`; solvers report it through
/// [`SolveOutcome::TimedOut`](crate::SolveOutcome::TimedOut).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct SolverError(pub String);

impl SolverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Main error type for characterization runs
#[derive(Debug, Error)]
pub enum BenchError {
    /// Malformed configuration or empty input, detected before sampling
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external solver failed in a way that cannot be aggregated
    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    /// The stop condition fired between trials
    #[error("Interrupted after {completed} of {requested} trials")]
    Interrupted { completed: usize, requested: usize },
}

impl BenchError {
    /// Shorthand for [`BenchError::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn is_interrupted(&self) -> bool {
        matches!(self, Self::Interrupted { .. })
    }
}

/// Result type alias for solvebench operations
pub type Result<T> = std::result::Result<T, BenchError>;
