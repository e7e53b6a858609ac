//! File system blob repository: raw bytes under `<account>/files` or `<account>/images`

use crate::domain::blob::check_blob_name;
use crate::domain::BlobKind;
use crate::error::Result;
use crate::infrastructure::namespace::Namespace;
use crate::infrastructure::repository::BlobRepository;
use crate::infrastructure::storage::{is_staging_name, missing_as, write_atomic};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// File system implementation of BlobRepository for one blob kind
#[derive(Debug, Clone)]
pub struct FileSystemBlobRepository {
    namespace: Namespace,
    kind: BlobKind,
}

impl FileSystemBlobRepository {
    pub fn new(namespace: Namespace, kind: BlobKind) -> Self {
        FileSystemBlobRepository { namespace, kind }
    }

    fn blob_path(&self, name: &str) -> Result<PathBuf> {
        check_blob_name(name)?;
        Ok(self.namespace.blob_dir(self.kind).join(name))
    }
}

impl BlobRepository for FileSystemBlobRepository {
    fn kind(&self) -> BlobKind {
        self.kind
    }

    fn store(&self, name: &str, bytes: &[u8]) -> Result<()> {
        let path = self.blob_path(name)?;

        let _guard = self.namespace.lock();
        write_atomic(&path, bytes)?;

        debug!(
            account = %self.namespace.account(),
            kind = %self.kind,
            blob = name,
            size = bytes.len(),
            "stored blob"
        );
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>> {
        let _guard = self.namespace.lock();
        let mut names = Vec::new();

        for entry in fs::read_dir(self.namespace.blob_dir(self.kind))? {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_staging_name(&name) {
                continue;
            }
            names.push(name);
        }

        names.sort();
        Ok(names)
    }

    fn fetch(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.blob_path(name)?;

        let _guard = self.namespace.lock();
        fs::read(path).map_err(missing_as(self.kind.label(), name))
    }

    fn delete(&self, name: &str) -> Result<()> {
        let path = self.blob_path(name)?;

        let _guard = self.namespace.lock();
        fs::remove_file(path).map_err(missing_as(self.kind.label(), name))?;

        debug!(account = %self.namespace.account(), kind = %self.kind, blob = name, "deleted blob");
        Ok(())
    }
}
