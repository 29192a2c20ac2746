//! Outcome of a single timed trial.

use std::time::Duration;

/// What the solver produced in one trial.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TrialOutcome {
    Solved { solution_length: u32 },
    TimedOut,
}

/// One trial's measurement. Immutable once produced by the trial runner.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sample {
    /// Goal depth the solver was asked to reach.
    pub goal_depth: u32,
    /// Wall time spent in the solver call, recorded for timeouts too.
    pub elapsed: Duration,
    pub outcome: TrialOutcome,
}

impl Sample {
    pub fn solved(goal_depth: u32, elapsed: Duration, solution_length: u32) -> Self {
        Self {
            goal_depth,
            elapsed,
            outcome: TrialOutcome::Solved { solution_length },
        }
    }

    pub fn timed_out(goal_depth: u32, elapsed: Duration) -> Self {
        Self {
            goal_depth,
            elapsed,
            outcome: TrialOutcome::TimedOut,
        }
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Solution length, or `None` if the trial timed out.
    pub fn solution_length(&self) -> Option<u32> {
        match self.outcome {
            TrialOutcome::Solved { solution_length } => Some(solution_length),
            TrialOutcome::TimedOut => None,
        }
    }

    pub fn is_timed_out(&self) -> bool {
        matches!(self.outcome, TrialOutcome::TimedOut)
    }

    /// True iff the trial produced a solution no longer than the goal depth.
    ///
    /// # Example
    ///
    /// ```
    /// use std::time::Duration;
    /// use solvebench_core::Sample;
    ///
    /// let t = Duration::from_millis(5);
    /// assert!(Sample::solved(20, t, 20).hit_goal());
    /// assert!(!Sample::solved(20, t, 21).hit_goal());
    /// assert!(!Sample::timed_out(20, t).hit_goal());
    /// ```
    pub fn hit_goal(&self) -> bool {
        self.solution_length()
            .is_some_and(|length| length <= self.goal_depth)
    }
}
