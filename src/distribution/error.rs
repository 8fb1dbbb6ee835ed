//----------------------------------------
// distribution errors
//----------------------------------------
use crate::error::{AbcomputeErr, ComputationErr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistributionErr {
    #[error("arguments to quantile function should be in [0, 1]; got {0}")]
    QuantileOutOfBounds(f64),
    #[error("degrees of freedom should be positive; got {0}")]
    BadDegreesOfFreedom(f64),
    #[error("distribution function evaluated at NaN (t: {t}, noncentrality: {nc})")]
    NotANumber { t: f64, nc: f64 },
}

impl From<DistributionErr> for AbcomputeErr {
    fn from(e: DistributionErr) -> Self {
        AbcomputeErr::Computation(ComputationErr::Distribution(e))
    }
}
