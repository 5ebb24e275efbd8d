//! Initialize payload workspace use case

use crate::domain::Folder;
use crate::error::{PayloadError, Result};
use crate::infrastructure::config::CONFIG_FILENAME;
use crate::infrastructure::{Config, JsonFileRepository, PayloadRepository};
use std::fs;
use std::path::Path;

/// Write a default config and an empty payload document into `path`.
pub fn init(path: &Path) -> Result<()> {
    // Create the directory if it doesn't exist
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let config_path = path.join(CONFIG_FILENAME);
    if config_path.exists() {
        return Err(PayloadError::Config(format!(
            "Directory already initialized: {}",
            path.display()
        )));
    }

    let config = Config::default();
    config.save(&config_path)?;

    // Keep an existing document; only seed a missing one
    let repo = JsonFileRepository::new(config.data_path(&config_path)).with_indent(config.indent);
    if !repo.exists() {
        repo.save(&Folder::new())?;
    }

    println!("Initialized payman workspace at {}", path.display());
    println!("Data file: {}", repo.path().display());

    Ok(())
}
