//! Initialize workspace use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, SchoolRepository, StoreDocument};
use std::fs;
use std::path::Path;

/// Initialize a new workspace at the specified path.
pub fn init(path: &Path) -> Result<()> {
    // Create the directory if it doesn't exist
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());

    repo.initialize()?;
    let config = write_defaults(&repo)?;

    println!("Initialized academia workspace at {}", path.display());
    println!("Store key: {}", config.store_key);

    Ok(())
}

/// Write the default config and an empty record store into `.academia`
fn write_defaults(repo: &FileSystemRepository) -> Result<Config> {
    let config = Config::default();
    repo.save_config(&config)?;
    repo.record_store(&config).save(&StoreDocument::default())?;
    Ok(config)
}
