//! Config management use case

use crate::error::{AcademiaError, Result};
use crate::infrastructure::{Config, FileSystemRepository, SchoolRepository};

/// Service for managing workspace configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "store_key" => Ok(config.store_key),
            "latency_ms" => Ok(config.latency_ms.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(AcademiaError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: store_key, latency_ms, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "store_key" => {
                Config::validate_store_key(value)?;
                config.store_key = value.to_string();
            }
            "latency_ms" => {
                config.latency_ms = value.parse().map_err(|_| {
                    AcademiaError::Config(format!(
                        "Invalid latency_ms: '{}'. Expected a whole number of milliseconds",
                        value
                    ))
                })?;
            }
            "created" => {
                return Err(AcademiaError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(AcademiaError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: store_key, latency_ms",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
