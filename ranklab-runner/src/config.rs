//! Scoring configuration file loading.
//!
//! The scoring parameters live in an optional TOML file; every field has
//! a default, so a missing file or a partial file both work. Bounds are
//! validated here; the weight sum deliberately is not — a drift from 1.0
//! is warned to stderr and the run continues with the caller's weights.

use std::path::Path;

use thiserror::Error;

use ranklab_core::{ConfigError, ScoringConfig};

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Load the scoring config, falling back to defaults when no path is
/// given. Warns (without failing) when the weights do not sum to 1.0.
pub fn load_scoring_config(path: Option<&Path>) -> Result<ScoringConfig, ConfigFileError> {
    let config = match path {
        None => ScoringConfig::default(),
        Some(path) => {
            let display = path.display().to_string();
            let contents = std::fs::read_to_string(path).map_err(|source| ConfigFileError::Read {
                path: display.clone(),
                source,
            })?;
            toml::from_str(&contents).map_err(|source| ConfigFileError::Parse {
                path: display,
                source,
            })?
        }
    };

    config.validate()?;

    let sum = config.weights_sum();
    if (sum - 1.0).abs() > 1e-9 {
        eprintln!(
            "WARNING: scoring weights sum to {sum} (not 1.0) — scores will scale accordingly"
        );
    }

    Ok(config)
}
