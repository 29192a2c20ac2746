//! Tests for the sequence summarizer.

use super::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const EPS: f64 = 1e-12;

#[test]
fn test_single_value() {
    for x in [0.0, -3.5, 42.0, 1e-9] {
        let stats = SequenceStatistics::from_values(&[x]).unwrap();
        assert_eq!(
            stats,
            SequenceStatistics {
                min: x,
                max: x,
                median: x,
                mean: x,
                stddev: 0.0,
            }
        );
    }
}

#[test]
fn test_even_median_averages_middle_pair() {
    let stats = SequenceStatistics::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();
    assert_eq!(stats.median, 2.5);
}

#[test]
fn test_odd_median_takes_middle() {
    let stats = SequenceStatistics::from_values(&[3.0, 1.0, 2.0]).unwrap();
    assert_eq!(stats.median, 2.0);
}

#[test]
fn test_constant_sequence_has_zero_stddev() {
    let stats = SequenceStatistics::from_values(&[2.0, 2.0, 2.0, 2.0]).unwrap();
    assert_eq!(stats.stddev, 0.0);
    assert_eq!(stats.mean, 2.0);
}

#[test]
fn test_constant_sequence_with_inexact_sum() {
    // Ten copies of 0.01 do not sum to exactly 0.1 in binary.
    let stats = SequenceStatistics::from_values(&[0.01; 10]).unwrap();
    assert!(stats.min <= stats.mean && stats.mean <= stats.max);
    assert!((stats.mean - 0.01).abs() < EPS);
    assert!(stats.stddev < EPS);
}

#[test]
fn test_population_stddev() {
    // Population variance of 2,4,4,4,5,5,7,9 is exactly 4.
    let stats =
        SequenceStatistics::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
    assert!((stats.mean - 5.0).abs() < EPS);
    assert!((stats.stddev - 2.0).abs() < EPS);
}

#[test]
fn test_empty_is_invalid_input() {
    let err = SequenceStatistics::from_values(&[]).unwrap_err();
    assert!(matches!(err, BenchError::InvalidInput(_)));
}

#[test]
fn test_nan_is_invalid_input() {
    let err = SequenceStatistics::from_values(&[1.0, f64::NAN]).unwrap_err();
    assert!(matches!(err, BenchError::InvalidInput(_)));
}

#[test]
fn test_input_order_does_not_matter() {
    let a = SequenceStatistics::from_values(&[5.0, 1.0, 9.0, 3.0, 7.0]).unwrap();
    let b = SequenceStatistics::from_values(&[1.0, 3.0, 5.0, 7.0, 9.0]).unwrap();
    assert_eq!(a.min, b.min);
    assert_eq!(a.max, b.max);
    assert_eq!(a.median, b.median);
    assert!((a.mean - b.mean).abs() < EPS);
}

#[test]
fn test_ordering_invariants_on_random_sequences() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..500 {
        let len = rng.random_range(1..64);
        let values: Vec<f64> = (0..len)
            .map(|_| rng.random_range(-1_000.0..1_000.0))
            .collect();
        let stats = SequenceStatistics::from_values(&values).unwrap();

        assert!(stats.min <= stats.median && stats.median <= stats.max);
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        assert!(stats.stddev >= 0.0);
    }
}

#[test]
fn test_scaled() {
    let stats = SequenceStatistics::from_values(&[0.001, 0.003]).unwrap();
    let ms = stats.scaled(1000.0);
    assert!((ms.mean - 2.0).abs() < 1e-9);
    assert!((ms.stddev - 1.0).abs() < 1e-9);
}

#[test]
fn test_summary_format() {
    let stats = SequenceStatistics::from_values(&[18.0, 20.0]).unwrap();
    assert_eq!(
        stats.summary("").to_string(),
        "min=18.000, max=20.000, median=19.000, mean=19.000, stddev=1.000"
    );
}
