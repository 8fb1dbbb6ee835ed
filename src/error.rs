//----------------------------------------
// Crate error type
//----------------------------------------
pub use crate::distribution::error::DistributionErr;
pub use crate::sample_size::error::InvalidInputErr;
pub use crate::util::error::RootFindErr;
use thiserror::Error;

/// Top level error. Input errors are detected before any numeric work and
/// can be fixed by the caller; computation errors are internal failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AbcomputeErr {
    #[error("invalid input: {0}")]
    InvalidInput(InvalidInputErr),
    #[error("computation failed: {0}")]
    Computation(ComputationErr),
}

impl AbcomputeErr {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, AbcomputeErr::InvalidInput(_))
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComputationErr {
    #[error("while finding root: {0}")]
    RootFind(RootFindErr),
    #[error("while evaluating distribution: {0}")]
    Distribution(DistributionErr),
}
