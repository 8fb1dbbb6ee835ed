use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::AbcomputeErr;
use crate::util::error::RootFindErr;

/// Bounds on the work a single root find may do
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Width of the final bracket around the root, in units of x
    pub tol: f64,
    /// Maximum number of bisection steps
    pub max_iter: usize,
    /// The search window is never widened past this value
    pub max_upper_bound: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tol: 0.5,
            max_iter: 200,
            max_upper_bound: 1e12,
        }
    }
}

fn finite_at(x: f64, value: f64) -> Result<f64, AbcomputeErr> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RootFindErr::NonFinite { x, value }.into())
    }
}

/// Given a monotonically increasing function f(x) and lower bound, finds
/// value x' to the right of the lower bound such that f(x') = target.
///
/// The returned x' is the right end of the final bracket: f(x') >= target
/// and the root lies within `settings.tol` to its left.
pub fn root_find_monotonic<F>(
    f: F,
    lower_bound: f64,
    target: f64,
    settings: &SolverSettings,
) -> Result<f64, AbcomputeErr>
where
    F: Fn(f64) -> Result<f64, AbcomputeErr>,
{
    let f_lower_bound = finite_at(lower_bound, f(lower_bound)?)?;
    if f_lower_bound >= target {
        return Err(RootFindErr::BadLowerBound.into());
    }

    // Set window for search
    let mut lower_bound = lower_bound;
    let mut upper_bound = lower_bound;
    let mut f_upper_bound = f_lower_bound;
    while f_upper_bound < target {
        if upper_bound >= settings.max_upper_bound {
            return Err(RootFindErr::NoBracket {
                upper_bound,
                target,
                reached: f_upper_bound,
            }
            .into());
        }
        lower_bound = upper_bound;
        // +1 in case lower_bound is zero
        upper_bound = (upper_bound * 2. + 1.).min(settings.max_upper_bound);
        f_upper_bound = finite_at(upper_bound, f(upper_bound)?)?;
    }
    debug!(lower_bound, upper_bound, target, "bracketed root");

    // Perform search; f(lower_bound) < target <= f(upper_bound) throughout
    let mut iterations = 0;
    while upper_bound - lower_bound > settings.tol {
        if iterations >= settings.max_iter {
            return Err(RootFindErr::FailedToConverge {
                iterations,
                reached: f_upper_bound,
                target,
                tol: settings.tol,
            }
            .into());
        }
        let x = lower_bound + (upper_bound - lower_bound) / 2.;
        // Bracket is down to adjacent floats
        if x <= lower_bound || x >= upper_bound {
            break;
        }
        let y = finite_at(x, f(x)?)?;
        if y < target {
            lower_bound = x;
        } else {
            upper_bound = x;
            f_upper_bound = y;
        }
        iterations += 1;
        trace!(iterations, x, y, "bisection step");
    }
    debug!(x = upper_bound, y = f_upper_bound, iterations, "root find converged");
    Ok(upper_bound)
}
