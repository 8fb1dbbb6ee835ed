use itertools::iproduct;
use serde::Serialize;
use tracing::debug;

use crate::error::AbcomputeErr;
use crate::sample_size::continuous::compute_continuous_sample_size_with;
use crate::sample_size::proportion::compute_proportion_sample_size;
use crate::sample_size::types::SampleSize;
use crate::util::root_find::SolverSettings;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableRow {
    pub mde: f64,
    pub power: f64,
    pub per_group_n: SampleSize,
}

/// Evaluates `size_for` on every (mde, power) pair, MDE-major
fn build_table<F>(
    mdes: &[f64],
    powers: &[f64],
    size_for: F,
) -> Result<Vec<TableRow>, AbcomputeErr>
where
    F: Fn(f64, f64) -> Result<SampleSize, AbcomputeErr>,
{
    debug!(n_mdes = mdes.len(), n_powers = powers.len(), "building sample size table");
    iproduct!(mdes.iter().copied(), powers.iter().copied())
        .map(|(mde, power)| -> Result<TableRow, AbcomputeErr> {
            Ok(TableRow {
                mde,
                power,
                per_group_n: size_for(mde, power)?,
            })
        })
        .collect()
}

/// Per-group sample sizes of the two-proportion z-test across several MDEs
/// and power levels
pub fn proportion_table(
    baseline_rate: f64,
    mdes: &[f64],
    alpha: f64,
    powers: &[f64],
) -> Result<Vec<TableRow>, AbcomputeErr> {
    build_table(mdes, powers, |mde, power| {
        compute_proportion_sample_size(baseline_rate, mde, alpha, power)
    })
}

/// Per-group sample sizes of the two-sample t-test across several MDEs and
/// power levels
pub fn continuous_table(
    settings: &SolverSettings,
    mean: f64,
    std_dev: f64,
    mdes: &[f64],
    alpha: f64,
    powers: &[f64],
) -> Result<Vec<TableRow>, AbcomputeErr> {
    build_table(mdes, powers, |mde, power| {
        compute_continuous_sample_size_with(settings, mean, mde, std_dev, alpha, power)
            .map(SampleSize::Finite)
    })
}
