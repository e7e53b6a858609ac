//! Initialize vault use case

use crate::error::{Result, VaultError};
use crate::infrastructure::Config;
use std::fs;
use std::path::Path;

/// Initialize a new vault at the specified root with the default config.
pub fn init(root: &Path) -> Result<Config> {
    if Config::exists_in(root) {
        return Err(VaultError::Config(format!(
            "Vault already initialized: {}",
            root.display()
        )));
    }

    if !root.exists() {
        fs::create_dir_all(root)?;
    }

    let config = Config::default();
    config.save_to_dir(root)?;

    tracing::info!(root = %root.display(), "initialized vault");
    Ok(config)
}
