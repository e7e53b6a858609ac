//! Filesystem helpers shared by the registry and the repositories

use crate::domain::path_component::STAGING_MARKER;
use crate::error::VaultError;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// True for in-flight temp files left by [`write_atomic`]
pub fn is_staging_name(name: &str) -> bool {
    name.contains(STAGING_MARKER)
}

/// Replace `path` with `contents`: write to a temp file in the same
/// directory, then rename into place.
pub fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    replace_via(path, |tmp_path| fs::write(tmp_path, contents))
}

fn staging_path(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("record");
    let tmp_name = format!(
        "{}{}{}-{}",
        file_name,
        STAGING_MARKER,
        std::process::id(),
        STAGING_SEQ.fetch_add(1, Ordering::Relaxed)
    );
    path.with_file_name(tmp_name)
}

/// Stage `path` with `write`, then rename it into place.
/// Whatever `write` left behind is removed if either step fails.
fn replace_via(path: &Path, write: impl FnOnce(&Path) -> io::Result<()>) -> io::Result<()> {
    let tmp_path = staging_path(path);

    let result = write(&tmp_path).and_then(|()| fs::rename(&tmp_path, path));

    if let Err(e) = result {
        match fs::remove_file(&tmp_path) {
            Ok(()) => {}
            Err(cleanup) if cleanup.kind() == io::ErrorKind::NotFound => {}
            Err(cleanup) => {
                tracing::warn!(path = %tmp_path.display(), error = %cleanup, "failed to remove temp file");
            }
        }
        return Err(e);
    }

    Ok(())
}

/// Map `NotFound` I/O errors to [`VaultError::NotFound`] for the given entity
pub fn missing_as(kind: &'static str, name: &str) -> impl FnOnce(io::Error) -> VaultError {
    let name = name.to_string();
    move |e| {
        if e.kind() == io::ErrorKind::NotFound {
            VaultError::not_found(kind, name)
        } else {
            VaultError::Io(e)
        }
    }
}
