//! solvebench - Depth Characterization for Black-Box Solvers
//!
//! Plug in a [`Solver`] and a [`Randomizer`], pick a goal depth range, and
//! get back per-depth solve time and solution length statistics.
//!
//! # Example
//!
//! ```rust
//! use solvebench::prelude::*;
//!
//! let stats = SequenceStatistics::from_values(&[1.0, 2.0, 3.0, 4.0]).unwrap();
//! assert_eq!(stats.median, 2.5);
//! assert_eq!(stats.mean, 2.5);
//! ```

// Boundary traits and shared types
pub use solvebench_core::{
    BenchError, Clock, NeverStop, Randomizer, Result, Sample, SequenceStatistics, ShouldStop,
    SolveOutcome, Solver, SolverError, StatisticsSummary, StopFlag, SystemClock, TrialOutcome,
};

// Configuration
pub use solvebench_config::{CharacterizationConfig, ConfigError, OutputConfig};

// Engine and reports
pub use solvebench_runner::{
    characterize, Characterization, CharacterizationBuilder, CharacterizationReport,
    CompositeTime, CsvExporter, DepthResult, DepthSampler, MarkdownReport, RunCompletion,
    RunningTotals, TrialRunner,
};

/// Colored console output for characterization runs.
#[cfg(feature = "console")]
pub mod console {
    pub use solvebench_console::{init, BenchConsoleLayer};
}

pub mod prelude {
    pub use super::{
        characterize, CharacterizationBuilder, CharacterizationConfig, CharacterizationReport,
        CsvExporter, MarkdownReport, Randomizer, SequenceStatistics, SolveOutcome, Solver,
        SolverError, StopFlag,
    };
}
