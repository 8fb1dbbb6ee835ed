//----------------------------------------
// compute mod types
//----------------------------------------
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EndpointType {
    Proportion,
    Continuous,
}

impl EndpointType {
    /// Name of the test the sample size is computed for
    pub fn test_name(&self) -> &'static str {
        match self {
            EndpointType::Proportion => "two-sample Z-test, two-sided",
            EndpointType::Continuous => "two-sample t-test, two-sided",
        }
    }
}

pub use crate::sample_size::types::{SampleSize, SampleSizeResult};
