use std::f64::consts::{PI, SQRT_2};

use crate::distribution::error::DistributionErr;
use crate::error::AbcomputeErr;
use statrs::function::erf::{erfc, erfc_inv};

pub fn std_normal_cdf(z: f64) -> f64 {
    0.5 * erfc(-z / SQRT_2)
}

pub fn std_normal_density(z: f64) -> f64 {
    (-0.5 * z * z).exp() / (2.0 * PI).sqrt()
}

pub fn std_normal_quantile(p: f64) -> Result<f64, AbcomputeErr> {
    if !(0.0..=1.0).contains(&p) {
        return Err(DistributionErr::QuantileOutOfBounds(p).into());
    }
    Ok(-SQRT_2 * erfc_inv(2.0 * p))
}
