//! Stub solvers.
//!
//! All stubs accept any state type and return unit moves; only the number
//! of moves and the time charged to the clock matter.

use std::time::Duration;

use solvebench_core::{SolveOutcome, Solver, SolverError};

use crate::clock::ManualClock;

/// Always returns a solution of `length` moves.
#[derive(Debug)]
pub struct FixedSolver {
    length: usize,
    cost: Option<(ManualClock, Duration)>,
    calls: usize,
}

impl FixedSolver {
    pub fn new(length: usize) -> Self {
        Self {
            length,
            cost: None,
            calls: 0,
        }
    }

    /// Advances `clock` by `cost` on every call.
    pub fn with_cost(mut self, clock: &ManualClock, cost: Duration) -> Self {
        self.cost = Some((clock.clone(), cost));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl<S> Solver<S> for FixedSolver {
    type Move = ();

    fn solve(&mut self, _: &S, _: u32, _: Duration) -> Result<SolveOutcome<()>, SolverError> {
        self.calls += 1;
        if let Some((clock, cost)) = &self.cost {
            clock.advance(*cost);
        }
        Ok(SolveOutcome::Solved(vec![(); self.length]))
    }
}

/// Always runs until the timeout and gives up.
#[derive(Debug)]
pub struct TimeoutSolver {
    clock: ManualClock,
    calls: usize,
}

impl TimeoutSolver {
    /// Advances `clock` by the full timeout on every call.
    pub fn new(clock: &ManualClock) -> Self {
        Self {
            clock: clock.clone(),
            calls: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl<S> Solver<S> for TimeoutSolver {
    type Move = ();

    fn solve(&mut self, _: &S, _: u32, timeout: Duration) -> Result<SolveOutcome<()>, SolverError> {
        self.calls += 1;
        self.clock.advance(timeout);
        Ok(SolveOutcome::TimedOut)
    }
}

/// Succeeds with one move a fixed number of times, then fails.
#[derive(Debug)]
pub struct FailingSolver {
    successes: usize,
    message: String,
    calls: usize,
}

impl FailingSolver {
    /// Fails on call number `successes + 1` and every call after it.
    pub fn after(successes: usize, message: impl Into<String>) -> Self {
        Self {
            successes,
            message: message.into(),
            calls: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl<S> Solver<S> for FailingSolver {
    type Move = ();

    fn solve(&mut self, _: &S, _: u32, _: Duration) -> Result<SolveOutcome<()>, SolverError> {
        self.calls += 1;
        if self.calls > self.successes {
            Err(SolverError::new(self.message.clone()))
        } else {
            Ok(SolveOutcome::Solved(vec![()]))
        }
    }
}

/// One scripted solver response.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Return `moves` moves after `cost`.
    Solve { moves: usize, cost: Duration },
    /// Consume the full timeout and give up.
    Timeout,
    /// Fail with a solver error.
    Fail,
}

/// Replays a script of responses, cycling when it runs out.
#[derive(Debug)]
pub struct ScriptedSolver {
    clock: ManualClock,
    script: Vec<Step>,
    calls: usize,
    goal_depths: Vec<u32>,
}

impl ScriptedSolver {
    pub fn new(clock: &ManualClock, script: Vec<Step>) -> Self {
        assert!(!script.is_empty(), "script must not be empty");
        Self {
            clock: clock.clone(),
            script,
            calls: 0,
            goal_depths: Vec::new(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Goal depths requested so far, in call order.
    pub fn goal_depths(&self) -> &[u32] {
        &self.goal_depths
    }
}

impl<S> Solver<S> for ScriptedSolver {
    type Move = ();

    fn solve(
        &mut self,
        _: &S,
        goal_depth: u32,
        timeout: Duration,
    ) -> Result<SolveOutcome<()>, SolverError> {
        let step = self.script[self.calls % self.script.len()];
        self.calls += 1;
        self.goal_depths.push(goal_depth);

        match step {
            Step::Solve { moves, cost } => {
                self.clock.advance(cost);
                Ok(SolveOutcome::Solved(vec![(); moves]))
            }
            Step::Timeout => {
                self.clock.advance(timeout);
                Ok(SolveOutcome::TimedOut)
            }
            Step::Fail => Err(SolverError::new(format!("scripted failure on call {}", self.calls))),
        }
    }
}
