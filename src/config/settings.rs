//! Settings that locate the config document
//!
//! The location is read from the environment each time it is resolved, so
//! changing `CONFIG_FILE_PATH` affects the next load, not just new stores.

use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

use crate::error::InfoError;

/// Environment variable naming the config document
pub const CONFIG_FILE_PATH_VAR: &str = "CONFIG_FILE_PATH";

/// Location used when `CONFIG_FILE_PATH` is unset
pub const DEFAULT_CONFIG_FILE: &str = "./config.json";

/// Settings resolved from defaults and the environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Path of the JSON config document
    pub config_file_path: PathBuf,
}

impl Settings {
    /// Loads settings in the following order:
    /// 1. Built-in default (`./config.json`)
    /// 2. Environment variables with prefix CONFIG_ (e.g., CONFIG_FILE_PATH)
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Config::builder()
            .set_default("config_file_path", DEFAULT_CONFIG_FILE)?
            // Keep the prefix so CONFIG_FILE_PATH maps to `config_file_path`
            .add_source(Environment::with_prefix("CONFIG").keep_prefix(true))
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_file_path: PathBuf::from(DEFAULT_CONFIG_FILE),
        }
    }
}

/// Where a [`ConfigStore`](super::ConfigStore) reads its document from
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SourceLocator {
    /// Resolve `CONFIG_FILE_PATH` at load time
    #[default]
    Environment,
    /// Always use this path
    Fixed(PathBuf),
}

impl SourceLocator {
    pub fn fixed(path: impl Into<PathBuf>) -> Self {
        SourceLocator::Fixed(path.into())
    }

    /// Returns the path the next load should read
    pub fn resolve(&self) -> Result<PathBuf, InfoError> {
        match self {
            SourceLocator::Environment => Ok(Settings::from_env()?.config_file_path),
            SourceLocator::Fixed(path) => Ok(path.clone()),
        }
    }
}
