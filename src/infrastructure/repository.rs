//! File system workspace repository

use crate::error::{AcademiaError, Result};
use crate::infrastructure::config::ACADEMIA_DIR;
use crate::infrastructure::{Config, FileKeyValueStore, RecordStore};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that pins the workspace root
pub const ROOT_ENV_VAR: &str = "ACADEMIA_ROOT";

/// Abstract repository for workspace operations
pub trait SchoolRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .academia/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .academia/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .academia directory exists
    fn is_initialized(&self) -> bool;

    /// Create .academia directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of SchoolRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover workspace root by walking up from current directory
    /// First checks ACADEMIA_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var(ROOT_ENV_VAR) {
            let path = PathBuf::from(root_path);
            if Self::has_academia_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(AcademiaError::Config(format!(
                    "ACADEMIA_ROOT is set to '{}' but no .academia directory found. \
                    Run 'academia init' in that directory or unset ACADEMIA_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover workspace root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_academia_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => {
                    // Reached filesystem root without finding .academia
                    return Err(AcademiaError::NotAcademiaDirectory(start.to_path_buf()));
                }
            }
        }
    }

    /// Check if a path contains a .academia directory
    fn has_academia_dir(path: &Path) -> bool {
        path.join(ACADEMIA_DIR).is_dir()
    }

    pub fn academia_dir(&self) -> PathBuf {
        self.root.join(ACADEMIA_DIR)
    }

    /// Where the logged-in user is remembered between invocations
    pub fn session_path(&self) -> PathBuf {
        self.academia_dir().join("session.json")
    }

    /// Record store persisted inside .academia under the configured key
    pub fn record_store(&self, config: &Config) -> RecordStore<FileKeyValueStore> {
        RecordStore::new(
            FileKeyValueStore::new(self.academia_dir()),
            config.store_key.clone(),
        )
    }
}

impl SchoolRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_academia_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let academia_dir = self.academia_dir();

        if academia_dir.exists() {
            return Err(AcademiaError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir(&academia_dir)?;
        Ok(())
    }
}
