//! End-to-end characterization runs against stub solvers.

use std::time::Duration;

use solvebench_config::CharacterizationConfig;
use solvebench_core::{BenchError, StopFlag};
use solvebench_runner::{
    characterize, Characterization, CharacterizationBuilder, CsvExporter, MarkdownReport,
    RunCompletion,
};
use solvebench_test::{
    CountingRandomizer, FailingSolver, FixedSolver, ManualClock, ScriptedSolver, Step, StopAfter,
    TimeoutSolver,
};

const TOLERANCE: f64 = 1e-9;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn test_fixed_length_solver_single_depth() {
    let clock = ManualClock::new();
    let solver = FixedSolver::new(3).with_cost(&clock, ms(10));
    let config = CharacterizationConfig::new(10, 0.5)
        .with_depth_range(5, 5)
        .with_timeout_seconds(1.0);

    let report = Characterization::new(config, solver, CountingRandomizer::new())
        .with_clock(clock.clone())
        .run()
        .unwrap();

    assert_eq!(report.depth_count(), 1);
    let depth = &report.depth_results[0];
    assert_eq!(depth.goal_depth, 5);
    assert_eq!(depth.sample_count(), 10);
    assert_eq!(depth.move_stats.unwrap().mean, 3.0);
    assert!((depth.time_stats.mean - 0.01).abs() < TOLERANCE);
    assert_eq!(depth.goal_hit_rate, 1.0);

    let composite = report.composite_times[0];
    assert!((composite.combined_mean.unwrap() - 1.51).abs() < TOLERANCE);
    assert!((composite.combined_worst_case.unwrap() - 1.51).abs() < TOLERANCE);

    assert_eq!(report.completion, RunCompletion::Complete);
    assert_eq!(report.total_duration, ms(100));
}

#[test]
fn test_inverted_range_is_invalid_input() {
    let config = CharacterizationConfig::new(10, 0.5).with_depth_range(6, 4);
    let mut characterization =
        Characterization::new(config, FixedSolver::new(3), CountingRandomizer::new());

    let err = characterization.run().unwrap_err();
    assert!(matches!(err, BenchError::InvalidInput(_)));
    assert_eq!(characterization.solver().calls(), 0);
}

#[test]
fn test_invalid_values_fail_before_sampling() {
    let base = CharacterizationConfig::new(10, 0.5).with_depth_range(1, 2);
    for config in [
        base.clone().with_iteration_count(0),
        base.clone().with_timeout_seconds(0.0),
        base.clone().with_seconds_per_move(0.0),
        base.clone().with_seconds_per_move(-1.0),
    ] {
        let mut characterization =
            Characterization::new(config, FixedSolver::new(3), CountingRandomizer::new());
        let err = characterization.run().unwrap_err();
        assert!(matches!(err, BenchError::InvalidInput(_)), "{err}");
        assert_eq!(characterization.solver().calls(), 0);
    }
}

#[test]
fn test_depths_ascending_and_independent() {
    let clock = ManualClock::new();
    let solver = ScriptedSolver::new(&clock, vec![Step::Solve { moves: 20, cost: ms(5) }]);
    let config = CharacterizationConfig::new(3, 0.1).with_depth_range(18, 22);

    let mut characterization = Characterization::new(config, solver, CountingRandomizer::new())
        .with_clock(clock.clone());
    let report = characterization.run().unwrap();

    assert_eq!(
        report.goal_depths().collect::<Vec<_>>(),
        vec![18, 19, 20, 21, 22]
    );
    assert_eq!(
        characterization.solver().goal_depths(),
        &[18, 18, 18, 19, 19, 19, 20, 20, 20, 21, 21, 21, 22, 22, 22]
    );

    let hit_rates: Vec<f64> = report.depth_results.iter().map(|d| d.goal_hit_rate).collect();
    assert_eq!(hit_rates, vec![0.0, 0.0, 1.0, 1.0, 1.0]);
    for depth in &report.depth_results {
        assert_eq!(depth.duration, ms(15));
    }
    assert_eq!(report.total_duration, ms(75));
}

#[test]
fn test_always_timeout_does_not_crash() {
    let clock = ManualClock::new();
    let config = CharacterizationConfig::new(6, 0.5).with_depth_range(19, 20);

    let report = Characterization::new(config, TimeoutSolver::new(&clock), CountingRandomizer::new())
        .with_clock(clock.clone())
        .run()
        .unwrap();

    assert_eq!(report.depth_count(), 2);
    for (depth, composite) in report.depth_results.iter().zip(&report.composite_times) {
        assert_eq!(depth.goal_hit_rate, 0.0);
        assert_eq!(depth.timeout_count, 6);
        assert!(depth.move_stats.is_none());
        assert_eq!(depth.time_stats.mean, 1.0);
        assert_eq!(composite.combined_mean, None);
    }

    let csv = CsvExporter::summary_to_string(&report);
    assert_eq!(csv.lines().count(), 3);
}

#[test]
fn test_timeout_policy_consistent_across_trials() {
    let clock = ManualClock::new();
    let solver = ScriptedSolver::new(
        &clock,
        vec![
            Step::Timeout,
            Step::Solve { moves: 19, cost: ms(200) },
            Step::Solve { moves: 21, cost: ms(400) },
        ],
    );
    let config = CharacterizationConfig::new(9, 0.25)
        .with_depth_range(20, 20)
        .with_timeout_seconds(2.0);

    let report = Characterization::new(config, solver, CountingRandomizer::new())
        .with_clock(clock.clone())
        .run()
        .unwrap();

    let depth = &report.depth_results[0];
    let moves = depth.move_stats.unwrap();
    assert_eq!(depth.timeout_count, 3);
    assert_eq!((moves.min, moves.max, moves.mean), (19.0, 21.0, 20.0));
    assert_eq!(depth.time_stats.max, 2.0);
    assert!((depth.time_stats.mean - (2.0 + 0.2 + 0.4) / 3.0).abs() < TOLERANCE);
    assert!((depth.goal_hit_rate - 1.0 / 3.0).abs() < TOLERANCE);

    let composite = report.composite_times[0];
    assert!((composite.combined_worst_case.unwrap() - (21.0 * 0.25 + 2.0)).abs() < TOLERANCE);
}

#[test]
fn test_interrupt_returns_partial_report() {
    let config = CharacterizationConfig::new(4, 0.5).with_depth_range(10, 14);
    // Two full depths (8 polls) plus one trial into the third.
    let stop = StopAfter::polls(9);

    let report = Characterization::new(config, FixedSolver::new(3), CountingRandomizer::new())
        .with_clock(ManualClock::new())
        .with_stop(stop)
        .run()
        .unwrap();

    assert!(report.is_partial());
    assert_eq!(report.goal_depths().collect::<Vec<_>>(), vec![10, 11]);
    assert_eq!(report.composite_times.len(), 2);
    assert_eq!(
        report.completion,
        RunCompletion::Interrupted {
            goal_depth: 12,
            completed_trials: 1
        }
    );
    assert!(MarkdownReport::to_string(&report).contains("Partial run"));
}

#[test]
fn test_stop_flag_raised_before_run() {
    let flag = StopFlag::new();
    flag.request_stop();
    let config = CharacterizationConfig::new(4, 0.5).with_depth_range(10, 12);

    let mut characterization =
        Characterization::new(config, FixedSolver::new(3), CountingRandomizer::new())
            .with_stop(flag);
    let report = characterization.run().unwrap();

    assert!(report.is_partial());
    assert_eq!(report.depth_count(), 0);
    assert_eq!(characterization.solver().calls(), 0);
}

#[test]
fn test_stop_before_huge_depth_range() {
    let flag = StopFlag::new();
    flag.request_stop();
    let config = CharacterizationConfig::new(1, 0.5).with_depth_range(0, u32::MAX);

    let mut characterization =
        Characterization::new(config, FixedSolver::new(3), CountingRandomizer::new())
            .with_stop(flag);
    let report = characterization.run().unwrap();

    assert_eq!(
        report.completion,
        RunCompletion::Interrupted {
            goal_depth: 0,
            completed_trials: 0
        }
    );
    assert_eq!(report.depth_count(), 0);
    assert_eq!(characterization.solver().calls(), 0);
}

#[test]
fn test_stop_before_huge_iteration_count() {
    let flag = StopFlag::new();
    flag.request_stop();
    let config = CharacterizationConfig::new(usize::MAX, 0.5).with_depth_range(5, 5);

    let report = characterize(&config, FixedSolver::new(3), CountingRandomizer::new(), flag)
        .unwrap();

    assert!(report.is_partial());
    assert_eq!(report.iteration_count, usize::MAX);
    assert_eq!(report.total_trials(), 0);
}

#[test]
fn test_solver_error_is_fatal() {
    let config = CharacterizationConfig::new(5, 0.5).with_depth_range(1, 3);
    let mut characterization = Characterization::new(
        config,
        FailingSolver::after(7, "lookup table missing"),
        CountingRandomizer::new(),
    );

    let err = characterization.run().unwrap_err();
    assert!(matches!(err, BenchError::Solver(_)));
    assert!(err.to_string().contains("lookup table missing"));
    // No retry after the failure.
    assert_eq!(characterization.solver().calls(), 8);
}

#[test]
fn test_builder_with_reference_time() {
    let clock = ManualClock::new();
    let solver = FixedSolver::new(12).with_cost(&clock, ms(100));

    let report = CharacterizationBuilder::new(2, 0.2)
        .with_depth_range(11, 12)
        .with_reference_time_seconds(3.13)
        .build(solver, CountingRandomizer::new())
        .with_clock(clock.clone())
        .run()
        .unwrap();

    assert_eq!(report.reference_time_seconds, Some(3.13));
    let composite = *report.composite(12).unwrap();
    // 12 * 0.2 + 0.1 = 2.5 s
    assert!((composite.combined_mean.unwrap() - 2.5).abs() < TOLERANCE);
    assert_eq!(report.beats_reference(&composite), Some(true));
    assert_eq!(report.depth(11).unwrap().goal_hit_rate, 0.0);
}

#[test]
fn test_full_csv_row_per_trial() {
    let config = CharacterizationConfig::new(7, 0.5).with_depth_range(3, 5);
    let report = Characterization::new(config, FixedSolver::new(4), CountingRandomizer::new())
        .with_clock(ManualClock::new())
        .run()
        .unwrap();

    let csv = CsvExporter::full_to_string(&report);
    assert_eq!(csv.lines().count(), 1 + 3 * 7);
    assert_eq!(report.total_trials(), 21);
}
