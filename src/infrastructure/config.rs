//! Configuration management

use crate::domain::RemovalMatch;
use crate::error::{PayloadError, Result};
use crate::infrastructure::repository::{JsonFileRepository, DEFAULT_INDENT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the config file looked up in the current directory
pub const CONFIG_FILENAME: &str = "payman.toml";

/// Data document used when the config doesn't name one
pub const DEFAULT_DATA_FILE: &str = "payload_data.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Payload document, relative to the config file's directory
    pub data_file: PathBuf,
    /// Spaces per indentation level in the saved document
    pub indent: usize,
    pub removal_match: RemovalMatch,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            indent: DEFAULT_INDENT,
            removal_match: RemovalMatch::default(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                PayloadError::Config(format!("Config file not found: {}", path.display()))
            } else {
                PayloadError::Io(e)
            }
        })?;

        toml::from_str(&contents).map_err(|e| {
            PayloadError::Config(format!("Failed to parse {}: {}", path.display(), e))
        })
    }

    /// Load config, falling back to defaults when the file is missing
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Data document location, resolved against the config file's directory
    pub fn data_path(&self, config_path: &Path) -> PathBuf {
        match config_path.parent() {
            Some(dir) if self.data_file.is_relative() => dir.join(&self.data_file),
            _ => self.data_file.clone(),
        }
    }
}

/// Config plus the file locations chosen for this run
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub config: Config,
    pub data_path: PathBuf,
}

impl Settings {
    /// Pick the config file and data document.
    ///
    /// An explicitly named config file must exist; the default
    /// `./payman.toml` may be absent, in which case defaults apply.
    /// An explicit data path wins over the config's `data_file`.
    pub fn resolve(config_path: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<Self> {
        let (config_path, config) = match config_path {
            Some(path) => {
                let config = Config::load(&path)?;
                (path, config)
            }
            None => {
                let path = PathBuf::from(CONFIG_FILENAME);
                let config = Config::load_or_default(&path)?;
                (path, config)
            }
        };

        let data_path = data_path.unwrap_or_else(|| config.data_path(&config_path));

        Ok(Settings {
            config_path,
            config,
            data_path,
        })
    }

    /// Repository for the chosen data document
    pub fn repository(&self) -> JsonFileRepository {
        JsonFileRepository::new(self.data_path.clone()).with_indent(self.config.indent)
    }
}
