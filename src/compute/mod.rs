//----------------------------------------
// computation mod
//----------------------------------------
pub mod types;

pub use crate::sample_size::continuous::{
    ContinuousInput, MIN_PER_GROUP_N, compute_continuous_sample_size,
    compute_continuous_sample_size_with, continuous_power,
};
pub use crate::sample_size::proportion::{
    ProportionInput, cohens_h, compute_proportion_sample_size, proportion_power,
};
pub use crate::sample_size::table::{TableRow, continuous_table, proportion_table};
pub use crate::sample_size::{DEFAULT_ALPHA, DEFAULT_POWER};
pub use crate::util::root_find::SolverSettings;
