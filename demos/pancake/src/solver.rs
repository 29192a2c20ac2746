//! Pancake sorting against a goal depth and deadline.
//!
//! A greedy pass gives an upper bound of at most `2n - 3` flips. When that
//! misses the goal depth, iterative deepening A* with the gap heuristic looks
//! for a solution within the goal until the deadline passes.

use std::time::{Duration, Instant};

use solvebench::{SolveOutcome, Solver, SolverError};

use crate::puzzle::{Flip, PancakeStack};

/// Nodes expanded between deadline checks.
const DEADLINE_CHECK_INTERVAL: u64 = 1024;

/// Goal-bounded pancake sorter.
#[derive(Debug, Default)]
pub struct PancakeSolver {
    nodes_expanded: u64,
}

impl PancakeSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total search nodes expanded across all calls.
    pub fn nodes_expanded(&self) -> u64 {
        self.nodes_expanded
    }
}

/// Brings each largest unplaced pancake to the top, then flips it into place.
pub fn greedy_flips(stack: &PancakeStack) -> Vec<Flip> {
    let mut stack = stack.clone();
    let mut flips = Vec::new();

    for size in (1..stack.len()).rev() {
        let Some(pos) = stack.position(size as u8) else {
            continue;
        };
        if pos == size {
            continue;
        }
        if pos != 0 {
            flips.push(Flip(pos + 1));
            stack.flip(Flip(pos + 1));
        }
        flips.push(Flip(size + 1));
        stack.flip(Flip(size + 1));
    }

    flips
}

impl Solver<PancakeStack> for PancakeSolver {
    type Move = Flip;

    fn solve(
        &mut self,
        state: &PancakeStack,
        goal_depth: u32,
        timeout: Duration,
    ) -> Result<SolveOutcome<Flip>, SolverError> {
        let deadline = Instant::now().checked_add(timeout);
        let greedy = greedy_flips(state);
        if greedy.len() as u32 <= goal_depth {
            return Ok(SolveOutcome::Solved(greedy));
        }

        let mut search = Search {
            stack: state.clone(),
            path: Vec::new(),
            deadline,
            nodes: 0,
        };
        let outcome = search.run(goal_depth);
        self.nodes_expanded += search.nodes;

        Ok(match outcome {
            Probe::Found => SolveOutcome::Solved(search.path),
            Probe::TimedOut => SolveOutcome::TimedOut,
            // Nothing within the goal exists; the greedy answer is the best known.
            Probe::Exceeded(_) => SolveOutcome::Solved(greedy),
        })
    }
}

enum Probe {
    Found,
    Exceeded(u32),
    TimedOut,
}

struct Search {
    stack: PancakeStack,
    path: Vec<Flip>,
    deadline: Option<Instant>,
    nodes: u64,
}

impl Search {
    fn run(&mut self, goal_depth: u32) -> Probe {
        if self.past_deadline() {
            return Probe::TimedOut;
        }

        let mut bound = self.stack.gap_count();
        loop {
            if bound > goal_depth {
                return Probe::Exceeded(bound);
            }
            match self.probe(0, bound) {
                Probe::Exceeded(next) => bound = next,
                other => return other,
            }
        }
    }

    fn probe(&mut self, depth: u32, bound: u32) -> Probe {
        if self.nodes % DEADLINE_CHECK_INTERVAL == 0 && self.past_deadline() {
            return Probe::TimedOut;
        }
        self.nodes += 1;

        let estimate = depth + self.stack.gap_count();
        if estimate > bound {
            return Probe::Exceeded(estimate);
        }
        if self.stack.is_solved() {
            return Probe::Found;
        }

        let last = self.path.last().copied();
        let mut next_bound = u32::MAX;
        for n in 2..=self.stack.len() {
            let flip = Flip(n);
            if last == Some(flip) {
                continue;
            }

            self.stack.flip(flip);
            self.path.push(flip);
            match self.probe(depth + 1, bound) {
                Probe::Exceeded(next) => next_bound = next_bound.min(next),
                other => return other,
            }
            self.path.pop();
            self.stack.flip(flip);
        }

        Probe::Exceeded(next_bound)
    }

    fn past_deadline(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}
