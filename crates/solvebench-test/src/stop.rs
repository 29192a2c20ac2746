//! Stop condition fixture.

use std::cell::Cell;

use solvebench_core::ShouldStop;

/// Answers `false` to the first `n` polls and `true` afterwards.
#[derive(Debug)]
pub struct StopAfter {
    remaining: Cell<usize>,
}

impl StopAfter {
    pub fn polls(n: usize) -> Self {
        Self {
            remaining: Cell::new(n),
        }
    }
}

impl ShouldStop for StopAfter {
    fn should_stop(&self) -> bool {
        match self.remaining.get() {
            0 => true,
            n => {
                self.remaining.set(n - 1);
                false
            }
        }
    }
}
