//! Randomizer fixture.

use solvebench_core::Randomizer;

/// Hands out 0, 1, 2, ... and counts how many states were drawn.
#[derive(Debug, Default)]
pub struct CountingRandomizer {
    next: u64,
}

impl CountingRandomizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawn(&self) -> u64 {
        self.next
    }
}

impl Randomizer<u64> for CountingRandomizer {
    fn random_state(&mut self) -> u64 {
        let state = self.next;
        self.next += 1;
        state
    }
}
