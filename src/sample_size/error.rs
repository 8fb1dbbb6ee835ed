//----------------------------------------
// input validation errors
//----------------------------------------
use crate::error::AbcomputeErr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInputErr {
    #[error("baseline rate should be in (0, 1); got {0}")]
    BaselineRate(f64),
    #[error("MDE should be positive (absolute lift); got {0}")]
    Mde(f64),
    #[error("target rate (baseline + MDE) should be below 1; got {baseline_rate} + {mde}")]
    TargetRate { baseline_rate: f64, mde: f64 },
    #[error("mean should be greater than 0; got {0}")]
    Mean(f64),
    #[error("standard deviation should be greater than 0; got {0}")]
    StdDev(f64),
    #[error("alpha should be in (0, 1); got {0}")]
    Alpha(f64),
    #[error("power should be in (0, 1); got {0}")]
    Power(f64),
    #[error("per-group sample size should be at least {min}; got {n}")]
    SampleSize { n: f64, min: f64 },
}

impl From<InvalidInputErr> for AbcomputeErr {
    fn from(e: InvalidInputErr) -> Self {
        AbcomputeErr::InvalidInput(e)
    }
}

/// Open unit interval check; NaN is rejected
pub(crate) fn in_unit_interval(x: f64) -> bool {
    x > 0.0 && x < 1.0
}

pub(crate) fn check_alpha(alpha: f64) -> Result<(), AbcomputeErr> {
    if !in_unit_interval(alpha) {
        return Err(InvalidInputErr::Alpha(alpha).into());
    }
    Ok(())
}

pub(crate) fn check_power(power: f64) -> Result<(), AbcomputeErr> {
    if !in_unit_interval(power) {
        return Err(InvalidInputErr::Power(power).into());
    }
    Ok(())
}

pub(crate) fn check_sample_size(n: f64, min: f64) -> Result<(), AbcomputeErr> {
    // Written so that NaN fails
    if !(n >= min) {
        return Err(InvalidInputErr::SampleSize { n, min }.into());
    }
    Ok(())
}
