//! Core types and traits for solvebench.
//!
//! solvebench characterizes a black-box solver: it samples random states,
//! times the solver against a goal depth under a per-trial timeout, and
//! summarizes solve time and solution length per depth. This crate holds the
//! pieces every other crate shares:
//!
//! - [`Solver`], [`Randomizer`], [`Clock`] and [`ShouldStop`], the boundary
//!   to the external collaborators
//! - [`Sample`], one trial's measurement
//! - [`SequenceStatistics`], the min/max/median/mean/stddev summarizer
//! - [`BenchError`], the error taxonomy

pub mod capability;
pub mod error;
pub mod sample;
pub mod statistics;
pub mod stop;

pub use capability::{Clock, Randomizer, SolveOutcome, Solver, SystemClock};
pub use error::{BenchError, Result, SolverError};
pub use sample::{Sample, TrialOutcome};
pub use statistics::{SequenceStatistics, StatisticsSummary};
pub use stop::{NeverStop, ShouldStop, StopFlag};
