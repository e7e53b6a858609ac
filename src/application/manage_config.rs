//! Config management use case

use crate::domain::CollisionPolicy;
use crate::error::{Result, VaultError};
use crate::infrastructure::Config;
use std::path::PathBuf;
use std::str::FromStr;

const VALID_KEYS: &str = "default_color, id_collision, image_extensions";

/// Service for managing vault configuration
pub struct ConfigService {
    root: PathBuf,
}

impl ConfigService {
    /// Create a new config service for the vault at `root`
    pub fn new(root: PathBuf) -> Self {
        ConfigService { root }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = Config::load_from_dir(&self.root)?;

        match key {
            "default_color" => Ok(config.default_color),
            "id_collision" => Ok(config.id_collision.to_string()),
            "image_extensions" => Ok(config.image_extensions.join(",")),
            _ => Err(VaultError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: {}",
                key, VALID_KEYS
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = Config::load_from_dir(&self.root)?;

        match key {
            "default_color" => {
                if value.trim().is_empty() {
                    return Err(VaultError::Config(
                        "default_color must not be empty".to_string(),
                    ));
                }
                config.default_color = value.trim().to_string();
            }
            "id_collision" => {
                config.id_collision =
                    CollisionPolicy::from_str(value).map_err(VaultError::Config)?;
            }
            "image_extensions" => {
                let extensions: Vec<String> = value
                    .split(',')
                    .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
                    .filter(|ext| !ext.is_empty())
                    .collect();
                if extensions.is_empty() {
                    return Err(VaultError::Config(
                        "image_extensions needs at least one extension".to_string(),
                    ));
                }
                config.image_extensions = extensions;
            }
            _ => {
                return Err(VaultError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: {}",
                    key, VALID_KEYS
                )));
            }
        }

        config.save_to_dir(&self.root)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }
}
