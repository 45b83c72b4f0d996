//! Configuration for model storage.
//!
//! Configuration is loaded from multiple sources:
//! 1. Default values (hardcoded)
//! 2. Configuration file (YAML)
//! 3. Environment variables (override)
//!
//! Environment variables are prefixed with `TUPLEGATE_` and use `__` as the
//! nested key separator, e.g. `TUPLEGATE_STORAGE__READ_TIMEOUT_SECS=2`.
//!
//! # Example YAML Configuration
//!
//! ```yaml
//! storage:
//!   read_timeout_secs: 5
//!   max_models_per_store: 100
//! ```

use std::path::Path;
use std::time::Duration;

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

/// Top-level configuration document.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TuplegateConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Model storage settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StorageConfig {
    /// Timeout applied to each type definition read, in seconds.
    ///
    /// Environment variable: `TUPLEGATE_STORAGE__READ_TIMEOUT_SECS`
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// Maximum number of models a single store may hold.
    ///
    /// Environment variable: `TUPLEGATE_STORAGE__MAX_MODELS_PER_STORE`
    #[serde(default = "default_max_models_per_store")]
    pub max_models_per_store: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            read_timeout_secs: default_read_timeout(),
            max_models_per_store: default_max_models_per_store(),
        }
    }
}

fn default_read_timeout() -> u64 {
    5
}

fn default_max_models_per_store() -> usize {
    100
}

impl StorageConfig {
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    pub fn with_read_timeout_secs(mut self, secs: u64) -> Self {
        self.read_timeout_secs = secs;
        self
    }

    pub fn with_max_models_per_store(mut self, max: usize) -> Self {
        self.max_models_per_store = max;
        self
    }
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl TuplegateConfig {
    /// Load configuration from a YAML file with environment variable overrides.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let config = Config::builder()
            .add_source(Config::try_from(&TuplegateConfig::default())?)
            .add_source(File::from(path).format(FileFormat::Yaml))
            .add_source(env_source())
            .build()?;

        let loaded: TuplegateConfig = config.try_deserialize()?;
        loaded.validate()?;

        Ok(loaded)
    }

    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            .add_source(Config::try_from(&TuplegateConfig::default())?)
            .add_source(env_source())
            .build()?;

        let loaded: TuplegateConfig = config.try_deserialize()?;
        loaded.validate()?;

        Ok(loaded)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.storage.read_timeout_secs == 0 {
            return Err(ConfigLoadError::Invalid {
                message: "storage.read_timeout_secs must be greater than 0".to_string(),
            });
        }
        if self.storage.max_models_per_store == 0 {
            return Err(ConfigLoadError::Invalid {
                message: "storage.max_models_per_store must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}

// TUPLEGATE_STORAGE__READ_TIMEOUT_SECS -> storage.read_timeout_secs
fn env_source() -> Environment {
    Environment::with_prefix("TUPLEGATE")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
