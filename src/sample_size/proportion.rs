use serde::Serialize;
use tracing::debug;

use crate::distribution::std_normal::{std_normal_cdf, std_normal_quantile};
use crate::error::AbcomputeErr;
use crate::sample_size::error::{
    InvalidInputErr, check_alpha, check_power, check_sample_size, in_unit_interval,
};
use crate::sample_size::types::SampleSize;

/// Inputs for a two-proportion z-test. All rates are fractions, so a 10%
/// conversion rate is passed as 0.10 and the MDE is an absolute lift.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProportionInput {
    pub baseline_rate: f64,
    pub mde: f64,
    pub alpha: f64,
    pub power: f64,
}

impl ProportionInput {
    pub fn new(baseline_rate: f64, mde: f64, alpha: f64, power: f64) -> Self {
        Self {
            baseline_rate,
            mde,
            alpha,
            power,
        }
    }

    /// Checks, in order: baseline rate, MDE, target rate, alpha, power.
    /// The first violated rule is reported.
    pub fn validate(&self) -> Result<(), AbcomputeErr> {
        validate_rates(self.baseline_rate, self.mde)?;
        check_alpha(self.alpha)?;
        check_power(self.power)
    }

    pub fn target_rate(&self) -> f64 {
        self.baseline_rate + self.mde
    }

    /// Cohen's h between the baseline and target rates
    pub fn effect_size(&self) -> f64 {
        cohens_h(self.baseline_rate, self.target_rate())
    }

    pub fn compute(&self) -> Result<SampleSize, AbcomputeErr> {
        self.validate()?;

        let h = self.effect_size();
        if h == 0.0 {
            debug!(
                baseline_rate = self.baseline_rate,
                mde = self.mde,
                "effect size is zero; no finite sample size"
            );
            return Ok(SampleSize::Infinite);
        }

        let z_alpha = std_normal_quantile(1.0 - self.alpha / 2.0)?;
        let z_beta = std_normal_quantile(self.power)?;
        let theta = z_alpha + z_beta;
        if theta <= 0.0 {
            // Any sample already rejects often enough
            return Ok(SampleSize::Finite(1));
        }

        //    theta = |h| * sqrt(n / 2)
        // => n = 2 * (theta / h)^2
        let n = 2.0 * (theta / h).powi(2);
        debug!(effect_size = h, z_alpha, z_beta, n, "solved z-test sample size");
        Ok(SampleSize::from_continuous(n))
    }
}

fn validate_rates(baseline_rate: f64, mde: f64) -> Result<(), AbcomputeErr> {
    if !in_unit_interval(baseline_rate) {
        return Err(InvalidInputErr::BaselineRate(baseline_rate).into());
    }
    if !(mde > 0.0) {
        return Err(InvalidInputErr::Mde(mde).into());
    }
    if !(baseline_rate + mde < 1.0) {
        return Err(InvalidInputErr::TargetRate { baseline_rate, mde }.into());
    }
    Ok(())
}

/// Difference of arcsine-square-root transformed proportions
pub fn cohens_h(p1: f64, p2: f64) -> f64 {
    2.0 * p2.sqrt().asin() - 2.0 * p1.sqrt().asin()
}

/// Minimum per-group sample size for a two-sided two-proportion z-test
pub fn compute_proportion_sample_size(
    baseline_rate: f64,
    mde: f64,
    alpha: f64,
    power: f64,
) -> Result<SampleSize, AbcomputeErr> {
    ProportionInput::new(baseline_rate, mde, alpha, power).compute()
}

/// Power of the two-sided two-proportion z-test with `n` subjects per group
pub fn proportion_power(
    baseline_rate: f64,
    mde: f64,
    n: f64,
    alpha: f64,
) -> Result<f64, AbcomputeErr> {
    validate_rates(baseline_rate, mde)?;
    check_alpha(alpha)?;
    check_sample_size(n, 1.0)?;

    let h = cohens_h(baseline_rate, baseline_rate + mde).abs();
    let z_alpha = std_normal_quantile(1.0 - alpha / 2.0)?;
    let shift = h * (n / 2.0).sqrt();
    Ok(std_normal_cdf(shift - z_alpha) + std_normal_cdf(-shift - z_alpha))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_size::{DEFAULT_ALPHA, DEFAULT_POWER};
    use assert_matches::assert_matches;

    fn invalid(res: Result<SampleSize, AbcomputeErr>) -> InvalidInputErr {
        match res {
            Err(AbcomputeErr::InvalidInput(e)) => e,
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn cohens_h_value() {
        assert!((cohens_h(0.10, 0.11) - 0.03262940076737697).abs() < 1e-12);
        assert!(cohens_h(0.11, 0.10) < 0.0);
    }

    #[test]
    fn ten_percent_one_point_lift() {
        let n = compute_proportion_sample_size(0.10, 0.01, 0.05, 0.8)
            .expect("failed to compute sample size");
        assert_eq!(n, SampleSize::Finite(14_745));
    }

    #[test]
    fn ten_percent_two_point_lift() {
        let n = compute_proportion_sample_size(0.10, 0.02, DEFAULT_ALPHA, DEFAULT_POWER)
            .expect("failed to compute sample size");
        assert_eq!(n, SampleSize::Finite(3_835));
    }

    #[test]
    fn reference_values() {
        for (baseline_rate, mde, alpha, power, expected) in [
            (0.05, 0.01, 0.05, 0.8, 8_143),
            (0.10, 0.01, 0.01, 0.8, 21_939),
            (0.10, 0.01, 0.05, 0.9, 19_739),
            (0.50, 0.10, 0.05, 0.8, 388),
            (0.20, 0.05, 0.05, 0.8, 1_092),
        ] {
            let n = compute_proportion_sample_size(baseline_rate, mde, alpha, power)
                .expect("failed to compute sample size");
            assert_eq!(n, SampleSize::Finite(expected), "{baseline_rate} + {mde}");
        }
    }

    #[test]
    fn vanishing_effect_is_infinite() {
        // The lift is below the resolution of the baseline rate
        let n = compute_proportion_sample_size(0.5, 1e-300, 0.05, 0.8)
            .expect("failed to compute sample size");
        assert_eq!(n, SampleSize::Infinite);
    }

    #[test]
    fn trivial_power_needs_one_subject() {
        let n = compute_proportion_sample_size(0.10, 0.01, 0.9, 0.1)
            .expect("failed to compute sample size");
        assert_eq!(n, SampleSize::Finite(1));
    }

    #[test]
    fn target_rate_must_stay_below_one() {
        assert_matches!(
            invalid(compute_proportion_sample_size(0.95, 0.1, 0.05, 0.8)),
            InvalidInputErr::TargetRate { .. }
        );
        assert_matches!(
            invalid(compute_proportion_sample_size(0.9, 0.1, 0.05, 0.8)),
            InvalidInputErr::TargetRate { .. }
        );
    }

    #[test]
    fn validation_order() {
        // Every rule is violated; the baseline rate is checked first
        assert_eq!(
            invalid(compute_proportion_sample_size(1.5, -1.0, 2.0, 2.0)),
            InvalidInputErr::BaselineRate(1.5)
        );
        assert_eq!(
            invalid(compute_proportion_sample_size(0.5, -1.0, 2.0, 2.0)),
            InvalidInputErr::Mde(-1.0)
        );
        assert_eq!(
            invalid(compute_proportion_sample_size(0.5, 0.6, 2.0, 2.0)),
            InvalidInputErr::TargetRate {
                baseline_rate: 0.5,
                mde: 0.6
            }
        );
        assert_eq!(
            invalid(compute_proportion_sample_size(0.5, 0.1, 2.0, 2.0)),
            InvalidInputErr::Alpha(2.0)
        );
        assert_eq!(
            invalid(compute_proportion_sample_size(0.5, 0.1, 0.05, 2.0)),
            InvalidInputErr::Power(2.0)
        );
    }

    #[test]
    fn rejects_out_of_domain_values() {
        for (baseline_rate, mde, alpha, power) in [
            (0.0, 0.01, 0.05, 0.8),
            (1.0, 0.01, 0.05, 0.8),
            (0.1, 0.0, 0.05, 0.8),
            (0.1, f64::NAN, 0.05, 0.8),
            (0.1, 0.01, 0.0, 0.8),
            (0.1, 0.01, 1.0, 0.8),
            (0.1, 0.01, 0.05, 0.0),
            (0.1, 0.01, 0.05, 1.0),
        ] {
            let res = compute_proportion_sample_size(baseline_rate, mde, alpha, power);
            assert!(res.is_err_and(|e| e.is_invalid_input()));
        }
    }

    #[test]
    fn power_brackets_sample_size() {
        for (baseline_rate, mde, power) in [(0.10, 0.01, 0.8), (0.5, 0.1, 0.8), (0.2, 0.05, 0.9)] {
            let n = compute_proportion_sample_size(baseline_rate, mde, 0.05, power)
                .unwrap()
                .as_u64()
                .unwrap() as f64;
            assert!(proportion_power(baseline_rate, mde, n, 0.05).unwrap() >= power);
            assert!(proportion_power(baseline_rate, mde, n - 1.0, 0.05).unwrap() < power);
        }
    }

    #[test]
    fn power_value() {
        let power = proportion_power(0.10, 0.01, 1_000., 0.05).unwrap();
        assert!((power - 0.11286043756338893).abs() < 1e-9);
    }

    #[test]
    fn power_rejects_small_sample() {
        assert_matches!(
            proportion_power(0.10, 0.01, 0.5, 0.05),
            Err(AbcomputeErr::InvalidInput(InvalidInputErr::SampleSize { .. }))
        );
    }
}
