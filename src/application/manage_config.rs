//! Config management use case

use crate::domain::RemovalMatch;
use crate::error::{PayloadError, Result};
use crate::infrastructure::Config;
use std::path::PathBuf;

/// Service for managing payman configuration
pub struct ConfigService {
    config_path: PathBuf,
}

impl ConfigService {
    /// Create a new config service for the given config file
    pub fn new(config_path: PathBuf) -> Self {
        ConfigService { config_path }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.list()?;

        match key {
            "data_file" => Ok(config.data_file.display().to_string()),
            "indent" => Ok(config.indent.to_string()),
            "removal_match" => Ok(config.removal_match.as_str().to_string()),
            _ => Err(Self::unknown_key(key)),
        }
    }

    /// Set a config value, creating the config file if needed
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.list()?;

        match key {
            "data_file" => {
                if value.trim().is_empty() {
                    return Err(PayloadError::Config(
                        "data_file must not be empty".to_string(),
                    ));
                }
                config.data_file = PathBuf::from(value);
            }
            "indent" => {
                config.indent = value.parse().map_err(|_| {
                    PayloadError::Config(format!(
                        "Invalid indent: '{}'. Expected a non-negative number",
                        value
                    ))
                })?;
            }
            "removal_match" => {
                config.removal_match = value
                    .parse::<RemovalMatch>()
                    .map_err(PayloadError::Config)?;
            }
            _ => return Err(Self::unknown_key(key)),
        }

        config.save(&self.config_path)
    }

    /// Current config (defaults if the file doesn't exist yet)
    pub fn list(&self) -> Result<Config> {
        Config::load_or_default(&self.config_path)
    }

    fn unknown_key(key: &str) -> PayloadError {
        PayloadError::Config(format!(
            "Unknown config key: '{}'. Valid keys are: data_file, indent, removal_match",
            key
        ))
    }
}
