//----------------------------------------
// Root lib
//----------------------------------------
//! The purpose of this library is to compute the minimum per-group sample
//! size of a two-arm A/B test. Proportion metrics (conversion rates) are
//! sized with the two-proportion z-test on Cohen's h; continuous metrics
//! (averages) with the two-sample t-test on Cohen's d, solving the
//! noncentral t power equation numerically.
//!
//! ```
//! use abcompute::compute::{compute_continuous_sample_size, compute_proportion_sample_size};
//! use abcompute::compute::types::SampleSize;
//!
//! let n = compute_proportion_sample_size(0.10, 0.02, 0.05, 0.8).unwrap();
//! assert_eq!(n, SampleSize::Finite(3_835));
//!
//! let n = compute_continuous_sample_size(100.0, 5.0, 15.0, 0.05, 0.8).unwrap();
//! assert_eq!(n, 143);
//! ```

/// This module houses the public API for computing sample sizes, achieved
/// power, and sample size tables
pub mod compute;
/// This module loads default alpha/power and solver settings from TOML
pub mod config;
mod distribution;
/// This module contains error types
pub mod error;
/// This module sets up the tracing subscriber used by the command line tool
pub mod logger;
mod sample_size;
mod util;
