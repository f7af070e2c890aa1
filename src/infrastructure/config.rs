//! Configuration management

use crate::error::{AcademiaError, Result};
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Name of the per-workspace metadata directory
pub const ACADEMIA_DIR: &str = ".academia";

/// Key the record store document is persisted under unless configured otherwise
pub const DEFAULT_STORE_KEY: &str = "academia-system-db";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_store_key")]
    pub store_key: String,
    /// Simulated latency applied to every directory operation
    #[serde(default)]
    pub latency_ms: u64,
    pub created: DateTime<Utc>,
}

fn default_store_key() -> String {
    DEFAULT_STORE_KEY.to_string()
}

fn store_key_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").unwrap())
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_key: default_store_key(),
            latency_ms: 0,
            created: Utc::now(),
        }
    }
}

impl Config {
    /// Load config from .academia/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(ACADEMIA_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AcademiaError::NotAcademiaDirectory(path.to_path_buf())
            } else {
                AcademiaError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| AcademiaError::Config(format!("Failed to parse config.toml: {}", e)))?;
        Self::validate_store_key(&config.store_key)?;
        Ok(config)
    }

    /// Save config to .academia/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let academia_dir = path.join(ACADEMIA_DIR);
        let config_path = academia_dir.join("config.toml");

        // Ensure .academia directory exists
        if !academia_dir.exists() {
            fs::create_dir(&academia_dir)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| AcademiaError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(&config_path, contents)?;

        Ok(())
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    /// Store keys double as file stems, so only a conservative alphabet is allowed
    pub fn validate_store_key(key: &str) -> Result<()> {
        if store_key_regex().is_match(key) {
            Ok(())
        } else {
            Err(AcademiaError::Config(format!(
                "Invalid store_key: '{}'. Use letters, digits, '-' or '_'",
                key
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store_key, "academia-system-db");
        assert_eq!(config.latency_ms, 0);
        assert_eq!(config.latency(), Duration::ZERO);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            latency_ms: 250,
            ..Config::default()
        };

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".academia").exists());
        assert!(temp.path().join(".academia/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            AcademiaError::NotAcademiaDirectory(_) => {}
            other => panic!("Expected NotAcademiaDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_optional_keys_use_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".academia")).unwrap();
        fs::write(
            temp.path().join(".academia/config.toml"),
            "created = \"2025-01-17T10:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.store_key, DEFAULT_STORE_KEY);
        assert_eq!(loaded.latency_ms, 0);
    }

    #[test]
    fn test_validate_store_key() {
        assert!(Config::validate_store_key("academia-system-db").is_ok());
        assert!(Config::validate_store_key("school_2025").is_ok());
        assert!(Config::validate_store_key("").is_err());
        assert!(Config::validate_store_key("../escape").is_err());
        assert!(Config::validate_store_key("with space").is_err());
    }

    #[test]
    fn test_load_rejects_bad_store_key() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            store_key: "a/b".to_string(),
            ..Config::default()
        };
        config.save_to_dir(temp.path()).unwrap();

        assert!(matches!(
            Config::load_from_dir(temp.path()),
            Err(AcademiaError::Config(_))
        ));
    }
}
