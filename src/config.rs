//----------------------------------------
// Configuration
//----------------------------------------
//! Optional TOML configuration. Every section and key may be omitted:
//!
//! ```toml
//! [defaults]
//! alpha = 0.05
//! power = 0.8
//!
//! [solver]
//! tol = 0.5
//! max_iter = 200
//! max_upper_bound = 1e12
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sample_size::error::in_unit_interval;
use crate::sample_size::{DEFAULT_ALPHA, DEFAULT_POWER};
use crate::util::root_find::SolverSettings;

#[derive(Error, Debug)]
pub enum ConfigErr {
    #[error("could not read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config value for {field}: {value}")]
    Invalid { field: &'static str, value: f64 },
}

/// Values used when the caller does not give alpha or power
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub alpha: f64,
    pub power: f64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            power: DEFAULT_POWER,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AbcomputeConfig {
    pub defaults: Defaults,
    pub solver: SolverSettings,
}

impl AbcomputeConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigErr> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigErr> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigErr::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigErr> {
        if !in_unit_interval(self.defaults.alpha) {
            return Err(ConfigErr::Invalid {
                field: "defaults.alpha",
                value: self.defaults.alpha,
            });
        }
        if !in_unit_interval(self.defaults.power) {
            return Err(ConfigErr::Invalid {
                field: "defaults.power",
                value: self.defaults.power,
            });
        }
        // Bracket width in subjects, at most one
        if !(self.solver.tol > 0.0 && self.solver.tol <= 1.0) {
            return Err(ConfigErr::Invalid {
                field: "solver.tol",
                value: self.solver.tol,
            });
        }
        if self.solver.max_iter == 0 {
            return Err(ConfigErr::Invalid {
                field: "solver.max_iter",
                value: 0.0,
            });
        }
        // The t-test needs at least two subjects per group
        if !(self.solver.max_upper_bound > 2.0) {
            return Err(ConfigErr::Invalid {
                field: "solver.max_upper_bound",
                value: self.solver.max_upper_bound,
            });
        }
        Ok(())
    }
}
