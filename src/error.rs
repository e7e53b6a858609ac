//! Error types for notevault

use thiserror::Error;

/// Main error type for notevault
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("Account already exists: {0}")]
    DuplicateAccount(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    #[error("Corrupt record '{id}': {reason}")]
    CorruptRecord { id: String, reason: String },

    #[error("Not logged in")]
    NotAuthenticated,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VaultError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        VaultError::NotFound {
            kind,
            name: name.into(),
        }
    }

    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            VaultError::InvalidInput(_) => 2,
            VaultError::InvalidCredentials | VaultError::NotAuthenticated => 3,
            VaultError::DuplicateAccount(_) => 4,
            VaultError::NotFound { .. } => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            VaultError::InvalidCredentials => {
                "Invalid username or password\n\n\
                Suggestions:\n\
                • Check --user / NOTEVAULT_USER and --password / NOTEVAULT_PASSWORD\n\
                • Usernames are case-sensitive\n\
                • Create an account with 'notevault register'"
                    .to_string()
            }
            VaultError::NotAuthenticated => {
                "Not logged in\n\n\
                Suggestions:\n\
                • Pass --user and --password (or set NOTEVAULT_USER / NOTEVAULT_PASSWORD)"
                    .to_string()
            }
            VaultError::DuplicateAccount(id) => {
                format!(
                    "Account already exists: {}\n\n\
                    Suggestions:\n\
                    • Choose a different username\n\
                    • Log in with 'notevault --user {} login'",
                    id, id
                )
            }
            VaultError::NotFound { kind, name } => {
                let listing = match *kind {
                    "note" => "notevault note list",
                    "image" => "notevault image list",
                    _ => "notevault file list",
                };
                format!(
                    "{} not found: {}\n\n\
                    Suggestions:\n\
                    • Use '{}' to see what is stored",
                    kind, name, listing
                )
            }
            VaultError::Config(msg) => {
                if msg.contains("id_collision") {
                    format!(
                        "{}\n\n\
                        Valid policies: overwrite, disambiguate\n\
                        Example: notevault config id_collision disambiguate",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using VaultError
pub type Result<T> = std::result::Result<T, VaultError>;
