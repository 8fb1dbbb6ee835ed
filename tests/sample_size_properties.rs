use std::thread;

use abcompute::compute::types::SampleSize;
use abcompute::compute::{
    DEFAULT_ALPHA, DEFAULT_POWER, compute_continuous_sample_size, compute_proportion_sample_size,
};
use abcompute::error::{AbcomputeErr, InvalidInputErr};
use assert_matches::assert_matches;

fn proportion_n(baseline_rate: f64, mde: f64, alpha: f64, power: f64) -> u64 {
    compute_proportion_sample_size(baseline_rate, mde, alpha, power)
        .expect("failed to compute proportion sample size")
        .as_u64()
        .expect("expected a finite sample size")
}

fn continuous_n(mde: f64, std_dev: f64, alpha: f64, power: f64) -> u64 {
    compute_continuous_sample_size(100., mde, std_dev, alpha, power)
        .expect("failed to compute continuous sample size")
}

#[test]
fn proportion_reference_scenario() {
    let n = proportion_n(0.10, 0.01, 0.05, 0.8);
    assert_eq!(n, 14_745);
    assert!(n > 0);
}

#[test]
fn continuous_reference_scenario() {
    let n = continuous_n(5., 15., 0.05, 0.8);
    assert!((143..=145).contains(&n), "got {n}");
}

#[test]
fn larger_mde_never_needs_more_subjects() {
    for baseline_rate in [0.02, 0.1, 0.4, 0.7] {
        let mut prev = u64::MAX;
        for mde in [0.001, 0.005, 0.01, 0.02, 0.05, 0.1, 0.2] {
            if baseline_rate + mde >= 1.0 {
                continue;
            }
            let n = proportion_n(baseline_rate, mde, DEFAULT_ALPHA, DEFAULT_POWER);
            assert!(n > 0);
            assert!(n <= prev, "baseline {baseline_rate}, mde {mde}");
            prev = n;
        }
    }
}

#[test]
fn less_noise_never_needs_more_subjects() {
    let mut std_dev = 40.;
    let mut prev = continuous_n(5., std_dev, DEFAULT_ALPHA, DEFAULT_POWER);
    for _ in 0..5 {
        std_dev /= 2.;
        let n = continuous_n(5., std_dev, DEFAULT_ALPHA, DEFAULT_POWER);
        assert!(n <= prev, "std_dev {std_dev}");
        prev = n;
    }
}

#[test]
fn stricter_alpha_never_needs_fewer_subjects() {
    let alphas = [0.1, 0.05, 0.025, 0.01, 0.001];
    let mut prev_proportion = 0;
    let mut prev_continuous = 0;
    for alpha in alphas {
        let n = proportion_n(0.10, 0.02, alpha, DEFAULT_POWER);
        assert!(n >= prev_proportion, "alpha {alpha}");
        prev_proportion = n;

        let n = continuous_n(5., 15., alpha, DEFAULT_POWER);
        assert!(n >= prev_continuous, "alpha {alpha}");
        prev_continuous = n;
    }
}

#[test]
fn more_power_never_needs_fewer_subjects() {
    let powers = [0.5, 0.7, 0.8, 0.9, 0.95, 0.99];
    let mut prev_proportion = 0;
    let mut prev_continuous = 0;
    for power in powers {
        let n = proportion_n(0.10, 0.02, DEFAULT_ALPHA, power);
        assert!(n >= prev_proportion, "power {power}");
        prev_proportion = n;

        let n = continuous_n(5., 15., DEFAULT_ALPHA, power);
        assert!(n >= prev_continuous, "power {power}");
        prev_continuous = n;
    }
}

#[test]
fn target_rate_at_or_above_one_is_rejected() {
    assert_matches!(
        compute_proportion_sample_size(0.95, 0.1, 0.05, 0.8),
        Err(AbcomputeErr::InvalidInput(InvalidInputErr::TargetRate { .. }))
    );
}

#[test]
fn out_of_domain_inputs_are_invalid() {
    let proportion_cases = [
        (0.1, 0.0, 0.05, 0.8),
        (0.1, -0.01, 0.05, 0.8),
        (0.1, 0.01, 0.0, 0.8),
        (0.1, 0.01, 1.2, 0.8),
        (0.1, 0.01, 0.05, -0.1),
        (0.1, 0.01, 0.05, 1.0),
    ];
    for (baseline_rate, mde, alpha, power) in proportion_cases {
        let err = compute_proportion_sample_size(baseline_rate, mde, alpha, power).unwrap_err();
        assert!(err.is_invalid_input(), "{err}");
    }

    let continuous_cases = [
        (0., 5., 15., 0.05, 0.8),
        (-1., 5., 15., 0.05, 0.8),
        (100., 0., 15., 0.05, 0.8),
        (100., 5., 0., 0.05, 0.8),
        (100., 5., -15., 0.05, 0.8),
        (100., 5., 15., 1.0, 0.8),
        (100., 5., 15., 0.05, 0.0),
    ];
    for (mean, mde, std_dev, alpha, power) in continuous_cases {
        let err = compute_continuous_sample_size(mean, mde, std_dev, alpha, power).unwrap_err();
        assert!(err.is_invalid_input(), "{err}");
    }
}

#[test]
fn repeated_calls_agree() {
    assert_eq!(
        compute_proportion_sample_size(0.10, 0.01, 0.05, 0.8).unwrap(),
        compute_proportion_sample_size(0.10, 0.01, 0.05, 0.8).unwrap()
    );
    assert_eq!(
        compute_continuous_sample_size(100., 5., 15., 0.05, 0.8).unwrap(),
        compute_continuous_sample_size(100., 5., 15., 0.05, 0.8).unwrap()
    );
}

#[test]
fn concurrent_callers_agree() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                (
                    compute_proportion_sample_size(0.10, 0.01, 0.05, 0.8).unwrap(),
                    compute_continuous_sample_size(100., 5., 15., 0.05, 0.8).unwrap(),
                )
            })
        })
        .collect();
    for handle in handles {
        let (proportion, continuous) = handle.join().expect("worker panicked");
        assert_eq!(proportion, SampleSize::Finite(14_745));
        assert_eq!(continuous, 143);
    }
}
