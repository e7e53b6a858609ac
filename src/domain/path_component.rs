//! Validation of names that become a single path component inside the vault

use crate::error::{Result, VaultError};

/// Marker embedded in the names of in-flight temp files.
/// Listings skip anything carrying it and user-supplied names may not contain it.
pub const STAGING_MARKER: &str = ".nv-tmp-";

/// Longest accepted component, in bytes. Leaves room under the usual
/// 255-byte file name limit for a record extension and a staging suffix.
pub const MAX_COMPONENT_LEN: usize = 200;

/// Check that `value` can be used as one file or directory name.
///
/// Rejects empty or overlong names, `.` and `..`, path separators, NUL bytes
/// and the staging marker, so a name can never address anything outside its parent.
pub fn check_component(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(VaultError::InvalidInput(format!("{} must not be empty", what)));
    }

    if value.len() > MAX_COMPONENT_LEN {
        return Err(VaultError::InvalidInput(format!(
            "{} is longer than {} bytes",
            what, MAX_COMPONENT_LEN
        )));
    }

    if value == "." || value == ".." {
        return Err(VaultError::InvalidInput(format!(
            "{} may not be '{}'",
            what, value
        )));
    }

    if value.contains(['/', '\\', '\0']) {
        return Err(VaultError::InvalidInput(format!(
            "{} may not contain path separators: '{}'",
            what, value
        )));
    }

    if value.contains(STAGING_MARKER) {
        return Err(VaultError::InvalidInput(format!(
            "{} may not contain '{}'",
            what, STAGING_MARKER
        )));
    }

    Ok(())
}
