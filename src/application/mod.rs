//! Application layer - Use cases and orchestration

pub mod init;
pub mod manage_config;
pub mod vault;

pub use manage_config::ConfigService;
pub use vault::{AccountVault, Vault, DEFAULT_ROOT};
