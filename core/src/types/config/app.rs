use crate::types::key::{DEFAULT_STORAGE_KEY, StorageKey, StorageKeyError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// User-facing configuration, persisted as config.toml.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub consent: ConsentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default config if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, AppConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), AppConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validates config values and returns list of validation errors.
    /// Returns empty vec if config is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if let Err(e) = self.consent.storage_key() {
            errors.push(format!("storage_key is invalid: {e}"));
        }

        if self.logging.filter.trim().is_empty() {
            errors.push("logging filter must not be empty".to_string());
        }

        errors
    }

    /// Returns a validated config, replacing invalid values with defaults.
    pub fn with_defaults_for_invalid(&self) -> Self {
        let defaults = Self::default();
        Self {
            consent: ConsentConfig {
                storage_key: if self.consent.storage_key().is_err() {
                    defaults.consent.storage_key
                } else {
                    self.consent.storage_key.clone()
                },
            },
            logging: LoggingConfig {
                filter: if self.logging.filter.trim().is_empty() {
                    defaults.logging.filter
                } else {
                    self.logging.filter.clone()
                },
            },
        }
    }
}

/// Where the consent record is kept.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConsentConfig {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl ConsentConfig {
    pub fn storage_key(&self) -> Result<StorageKey, StorageKeyError> {
        StorageKey::try_from(self.storage_key.as_str())
    }
}

impl Default for ConsentConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

/// Log filter used when `RUST_LOG` is not set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_filter() -> String {
    "info".to_string()
}

/// Errors that can occur when loading or saving config.
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
