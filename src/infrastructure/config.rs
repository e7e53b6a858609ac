//! Configuration management

use crate::domain::note::CollisionPolicy;
use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file inside the vault root
pub const CONFIG_FILE: &str = "vault.toml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color given to notes created without one
    pub default_color: String,
    /// What to do when two notes would receive the same id
    pub id_collision: CollisionPolicy,
    /// Extensions accepted for uploads into the images area
    pub image_extensions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_color: "#f0f0f0".to_string(),
            id_collision: CollisionPolicy::default(),
            image_extensions: vec!["png".to_string(), "jpg".to_string(), "jpeg".to_string()],
        }
    }
}

impl Config {
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(CONFIG_FILE)
    }

    /// Check if a vault.toml exists in the given root
    pub fn exists_in(root: &Path) -> bool {
        Self::path_in(root).is_file()
    }

    /// Load config from vault.toml in the given root, falling back to defaults
    pub fn load_from_dir(root: &Path) -> Result<Self> {
        let config_path = Self::path_in(root);

        let contents = match fs::read_to_string(&config_path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Config::default());
            }
            Err(e) => return Err(VaultError::Io(e)),
        };

        toml::from_str(&contents)
            .map_err(|e| VaultError::Config(format!("Failed to parse {}: {}", CONFIG_FILE, e)))
    }

    /// Save config to vault.toml in the given root
    pub fn save_to_dir(&self, root: &Path) -> Result<()> {
        if !root.exists() {
            fs::create_dir_all(root)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| VaultError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(Self::path_in(root), contents)?;

        Ok(())
    }
}
