//! Depth characterization engine for black-box solvers.
//!
//! Measures how long a solver takes, and how long its solutions are, when
//! asked for solutions of at most a given goal depth, across a range of
//! depths.
//!
//! # Overview
//!
//! - [`TrialRunner`] times one solver call on one random state
//! - [`DepthSampler`] runs `iteration_count` trials at a goal depth and
//!   summarizes them into a [`DepthResult`]
//! - [`Characterization`] walks the depth range and assembles a
//!   [`CharacterizationReport`], including the derived [`CompositeTime`]
//!   projections
//! - [`CsvExporter`] and [`MarkdownReport`] render the report
//!
//! Timed-out trials count as goal misses and contribute their elapsed time
//! to solve time statistics, but are left out of solution length statistics.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use solvebench_core::{SolveOutcome, Solver, SolverError};
//! use solvebench_runner::{CharacterizationBuilder, MarkdownReport};
//!
//! // Pretends every state is solvable in exactly 20 moves.
//! struct Twenty;
//!
//! impl Solver<u64> for Twenty {
//!     type Move = u8;
//!     fn solve(&mut self, _: &u64, _: u32, _: Duration) -> Result<SolveOutcome<u8>, SolverError> {
//!         Ok(SolveOutcome::Solved(vec![0; 20]))
//!     }
//! }
//!
//! let mut characterization = CharacterizationBuilder::new(5, 0.15)
//!     .with_depth_range(19, 21)
//!     .build(Twenty, || 0u64);
//!
//! let report = characterization.run().unwrap();
//! assert_eq!(report.depth_count(), 3);
//! assert_eq!(report.depth(19).unwrap().goal_hit_rate, 0.0);
//! assert_eq!(report.depth(20).unwrap().goal_hit_rate, 1.0);
//!
//! let md = MarkdownReport::to_string(&report);
//! assert!(md.contains("## Composite Time"));
//! ```

mod report;
mod result;
mod runner;
mod sampler;
mod trial;

pub use report::{CsvExporter, MarkdownReport};
pub use result::{CharacterizationReport, CompositeTime, DepthResult, RunCompletion};
pub use runner::{characterize, Characterization, CharacterizationBuilder};
pub use sampler::{DepthSampler, RunningTotals};
pub use trial::TrialRunner;
