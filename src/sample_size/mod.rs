//----------------------------------------
// sample size mod
//----------------------------------------
pub mod continuous;
pub mod error;
pub mod proportion;
pub mod table;
pub mod types;

/// Conventional two-sided significance level
pub const DEFAULT_ALPHA: f64 = 0.05;
/// Conventional target power (1 - beta)
pub const DEFAULT_POWER: f64 = 0.8;
