//! Shared test fixtures for solvebench crates.
//!
//! - [`clock`] - A manually advanced clock for exact timing assertions
//! - [`solvers`] - Stub solvers with fixed, timed-out, failing or scripted behavior
//! - [`randomizer`] - A counting randomizer
//! - [`stop`] - A stop condition that fires after a number of polls
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! solvebench-test = { workspace = true }
//! ```
//!
//! Stub solvers advance a shared [`ManualClock`] by their configured cost,
//! so a `TrialRunner` built with the same clock measures exactly that cost.

pub mod clock;
pub mod randomizer;
pub mod solvers;
pub mod stop;

pub use clock::ManualClock;
pub use randomizer::CountingRandomizer;
pub use solvers::{FailingSolver, FixedSolver, ScriptedSolver, Step, TimeoutSolver};
pub use stop::StopAfter;
