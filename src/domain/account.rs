//! Account identity

use super::path_component::check_component;
use crate::error::{Result, VaultError};
use std::fmt;

/// Root-level entries an account directory must never shadow
const RESERVED_NAMES: &[&str] = &["users.json", "vault.toml"];

/// Validated account identifier. Doubles as the account's directory name.
///
/// Ids are case-sensitive, so isolation between `alice` and `Alice` relies on
/// a case-sensitive filesystem. On a case-folding one the two would share a
/// directory; registration refuses an id whose directory already belongs to
/// another account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(String);

impl AccountId {
    pub fn parse(raw: &str) -> Result<Self> {
        check_component("username", raw)?;

        if RESERVED_NAMES.contains(&raw) {
            return Err(VaultError::InvalidInput(format!(
                "username '{}' is reserved",
                raw
            )));
        }

        Ok(AccountId(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let id = AccountId::parse("Alice").unwrap();
        assert_eq!(id.as_str(), "Alice");
        assert_eq!(id.to_string(), "Alice");
    }

    #[test]
    fn test_case_sensitive() {
        assert_ne!(
            AccountId::parse("alice").unwrap(),
            AccountId::parse("Alice").unwrap()
        );
    }

    #[test]
    fn test_rejects_empty_and_traversal() {
        assert!(AccountId::parse("").is_err());
        assert!(AccountId::parse("..").is_err());
        assert!(AccountId::parse("bob/../alice").is_err());
    }

    #[test]
    fn test_rejects_reserved() {
        let err = AccountId::parse("users.json").unwrap_err();
        assert!(err.to_string().contains("reserved"));
    }
}
