use serde::Serialize;
use tracing::debug;

use crate::distribution::noncentral_t::{noncentral_t_cdf, students_t_quantile};
use crate::error::AbcomputeErr;
use crate::sample_size::error::{InvalidInputErr, check_alpha, check_power, check_sample_size};
use crate::util::root_find::{SolverSettings, root_find_monotonic};

/// Smallest per-group sample size with a defined t-test (df = 2n - 2 > 0)
pub const MIN_PER_GROUP_N: f64 = 2.0;

/// Inputs for a two-sample t-test on a continuous metric. `mean` is the
/// current metric average; it is checked but does not enter the effect size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContinuousInput {
    pub mean: f64,
    pub mde: f64,
    pub std_dev: f64,
    pub alpha: f64,
    pub power: f64,
}

impl ContinuousInput {
    pub fn new(mean: f64, mde: f64, std_dev: f64, alpha: f64, power: f64) -> Self {
        Self {
            mean,
            mde,
            std_dev,
            alpha,
            power,
        }
    }

    /// Checks, in order: mean, standard deviation, MDE, alpha, power.
    pub fn validate(&self) -> Result<(), AbcomputeErr> {
        validate_moments(self.mean, self.mde, self.std_dev)?;
        check_alpha(self.alpha)?;
        check_power(self.power)
    }

    /// Cohen's d
    pub fn effect_size(&self) -> f64 {
        self.mde / self.std_dev
    }

    pub fn compute(&self) -> Result<u64, AbcomputeErr> {
        self.compute_with(&SolverSettings::default())
    }

    pub fn compute_with(&self, settings: &SolverSettings) -> Result<u64, AbcomputeErr> {
        self.validate()?;

        let d = self.effect_size();
        let power_at = |n: f64| t_test_power(d, n, self.alpha);

        if power_at(MIN_PER_GROUP_N)? >= self.power {
            debug!(effect_size = d, "smallest design already reaches target power");
            return Ok(MIN_PER_GROUP_N as u64);
        }

        // Power is increasing in n, so the first n reaching the target is the root
        let upper = root_find_monotonic(power_at, MIN_PER_GROUP_N, self.power, settings)?;
        let mut n = upper.ceil();
        while n > MIN_PER_GROUP_N && power_at(n - 1.0)? >= self.power {
            n -= 1.0;
        }
        debug!(effect_size = d, upper, n, "solved t-test sample size");
        Ok(n as u64)
    }
}

fn validate_moments(mean: f64, mde: f64, std_dev: f64) -> Result<(), AbcomputeErr> {
    if !(mean > 0.0) {
        return Err(InvalidInputErr::Mean(mean).into());
    }
    if !(std_dev > 0.0) {
        return Err(InvalidInputErr::StdDev(std_dev).into());
    }
    if !(mde > 0.0) {
        return Err(InvalidInputErr::Mde(mde).into());
    }
    Ok(())
}

/// Power of the two-sided independent two-sample t-test with `n` subjects in
/// each group and standardized effect size `effect_size`
pub(crate) fn t_test_power(effect_size: f64, n: f64, alpha: f64) -> Result<f64, AbcomputeErr> {
    let df = 2.0 * n - 2.0;
    let nc = effect_size * (n / 2.0).sqrt();
    let crit = students_t_quantile(1.0 - alpha / 2.0, df)?;
    let upper = 1.0 - noncentral_t_cdf(crit, df, nc)?;
    let lower = noncentral_t_cdf(-crit, df, nc)?;
    Ok(upper + lower)
}

/// Minimum per-group sample size for a two-sided two-sample t-test
pub fn compute_continuous_sample_size(
    mean: f64,
    mde: f64,
    std_dev: f64,
    alpha: f64,
    power: f64,
) -> Result<u64, AbcomputeErr> {
    ContinuousInput::new(mean, mde, std_dev, alpha, power).compute()
}

/// Same as [`compute_continuous_sample_size`] with explicit solver bounds
pub fn compute_continuous_sample_size_with(
    settings: &SolverSettings,
    mean: f64,
    mde: f64,
    std_dev: f64,
    alpha: f64,
    power: f64,
) -> Result<u64, AbcomputeErr> {
    ContinuousInput::new(mean, mde, std_dev, alpha, power).compute_with(settings)
}

/// Power of the two-sided two-sample t-test with `n` subjects per group
pub fn continuous_power(
    mean: f64,
    mde: f64,
    std_dev: f64,
    n: f64,
    alpha: f64,
) -> Result<f64, AbcomputeErr> {
    validate_moments(mean, mde, std_dev)?;
    check_alpha(alpha)?;
    check_sample_size(n, MIN_PER_GROUP_N)?;
    t_test_power(mde / std_dev, n, alpha)
}
