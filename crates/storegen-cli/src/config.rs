use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use storegen_core::DatasetCounts;
use storegen_store::DEFAULT_DATABASE_FILE;

pub const DEFAULT_CONFIG_FILE: &str = "storegen.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file '{}' not found", .0.display())]
    Missing(PathBuf),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error(transparent)]
    Invalid(#[from] storegen_core::Error),
}

/// Settings read from `storegen.toml`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoregenConfig {
    pub seed: u64,
    pub data_dir: PathBuf,
    pub database: PathBuf,
    pub counts: DatasetCounts,
}

impl Default for StoregenConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            data_dir: PathBuf::from("data"),
            database: PathBuf::from("data").join(DEFAULT_DATABASE_FILE),
            counts: DatasetCounts::default(),
        }
    }
}

/// Load settings from `path`, or from `storegen.toml` in the working
/// directory when no path is given.
///
/// A missing default file yields the built-in defaults; a missing explicit
/// file is an error.
pub fn load_config(path: Option<&Path>) -> Result<StoregenConfig, ConfigError> {
    let (path, explicit) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };

    if !path.exists() {
        if explicit {
            return Err(ConfigError::Missing(path));
        }
        return Ok(StoregenConfig::default());
    }

    let content = std::fs::read_to_string(&path)?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<StoregenConfig, ConfigError> {
    let config: StoregenConfig = toml::from_str(content)?;
    config.counts.validate()?;
    Ok(config)
}
