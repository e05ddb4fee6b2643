//! Linalg Configuration
//!
//! Defines which numeric backend runs and the limits applied before any
//! buffer is built. Configuration specifies constraints only; enforcement
//! is handled by the engine.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::backend::BackendKind;

/// Failure to load a configuration document
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LinalgConfig {
    /// Numeric backend performing gemm and LU solve
    pub backend: BackendKind,

    /// Relative pivot tolerance: a pivot is singular when its magnitude is
    /// at or below `n * singular_tolerance * max|a_ij|`
    pub singular_tolerance: f64,

    /// Maximum rows or columns accepted for any input
    pub max_dimension: usize,
}

impl Default for LinalgConfig {
    fn default() -> Self {
        LinalgConfig {
            backend: BackendKind::Nalgebra,
            singular_tolerance: f64::EPSILON,
            max_dimension: 4096,
        }
    }
}

impl LinalgConfig {
    /// Create a new configuration with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration document; missing fields keep their defaults.
    pub fn from_json_str(doc: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(doc)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let doc = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&doc)
    }
}
