//----------------------------------------
// root finding errors
//----------------------------------------
use crate::error::{AbcomputeErr, ComputationErr};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RootFindErr {
    #[error("f(lower_bound) is larger than target; use smaller lower bound")]
    BadLowerBound,
    #[error(
        "no value up to {upper_bound} reaches target {target} \
        (largest value reached: {reached})"
    )]
    NoBracket {
        upper_bound: f64,
        target: f64,
        reached: f64,
    },
    #[error(
        "failed to converge after {iterations} iterations (computed value: {reached}, \
        target: {target}, tolerance: {tol})"
    )]
    FailedToConverge {
        iterations: usize,
        reached: f64,
        target: f64,
        tol: f64,
    },
    #[error("function returned non-finite value {value} at {x}")]
    NonFinite { x: f64, value: f64 },
}

impl From<RootFindErr> for AbcomputeErr {
    fn from(e: RootFindErr) -> Self {
        AbcomputeErr::Computation(ComputationErr::RootFind(e))
    }
}
