//! Per-account storage namespaces

use crate::domain::{AccountId, BlobKind};
use crate::error::Result;
use crate::infrastructure::storage::is_staging_name;
use parking_lot::{Mutex, MutexGuard};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use walkdir::WalkDir;

const NOTES_DIR: &str = "notes";

/// One lock per account directory, shared by every namespace handle in the process
fn namespace_locks() -> &'static Mutex<HashMap<PathBuf, Arc<Mutex<()>>>> {
    static LOCKS: OnceLock<Mutex<HashMap<PathBuf, Arc<Mutex<()>>>>> = OnceLock::new();
    LOCKS.get_or_init(|| Mutex::new(HashMap::new()))
}

fn lock_for(dir: &Path) -> Arc<Mutex<()>> {
    let key = fs::canonicalize(dir).unwrap_or_else(|_| dir.to_path_buf());
    namespace_locks()
        .lock()
        .entry(key)
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}

/// Resolves account namespaces below a vault root
pub struct VaultNamespace;

impl VaultNamespace {
    /// Ensure `<root>/<account>/{notes,files,images}` exist and return handles to them.
    /// Safe to call repeatedly.
    pub fn open(vault_root: &Path, account: &AccountId) -> Result<Namespace> {
        let root = vault_root.join(account.as_str());

        fs::create_dir_all(root.join(NOTES_DIR))?;
        for kind in BlobKind::ALL {
            fs::create_dir_all(root.join(kind.dir_name()))?;
        }

        let lock = lock_for(&root);
        tracing::debug!(account = %account, root = %root.display(), "opened namespace");

        Ok(Namespace {
            account: account.clone(),
            root,
            lock,
        })
    }
}

/// Handle to one account's storage area
#[derive(Debug, Clone)]
pub struct Namespace {
    account: AccountId,
    root: PathBuf,
    lock: Arc<Mutex<()>>,
}

/// Entry counts and stored bytes of a namespace
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceUsage {
    pub notes: usize,
    pub files: usize,
    pub images: usize,
    pub bytes: u64,
}

impl Namespace {
    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn notes_dir(&self) -> PathBuf {
        self.root.join(NOTES_DIR)
    }

    pub fn blob_dir(&self, kind: BlobKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Serialize access to this namespace within the process
    pub(crate) fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock()
    }

    /// Count stored entries per subarea and sum their sizes
    pub fn usage(&self) -> Result<NamespaceUsage> {
        let _guard = self.lock();
        let mut usage = NamespaceUsage::default();

        for entry in WalkDir::new(&self.root).min_depth(2).max_depth(2) {
            let entry = entry.map_err(|e| {
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("filesystem loop in namespace"))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.file_name().to_str().map_or(true, is_staging_name) {
                continue;
            }

            let area = entry
                .path()
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str());
            let counter = match area {
                Some(NOTES_DIR) => &mut usage.notes,
                Some("files") => &mut usage.files,
                Some("images") => &mut usage.images,
                _ => continue,
            };
            *counter += 1;
            usage.bytes += entry.metadata().map(|m| m.len()).unwrap_or(0);
        }

        Ok(usage)
    }
}
