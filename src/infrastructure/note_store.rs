//! File system note repository: one JSON record per note in `<account>/notes`

use crate::domain::note::{self, CollisionPolicy};
use crate::domain::path_component::check_component;
use crate::domain::{Note, NoteId};
use crate::error::{Result, VaultError};
use crate::infrastructure::namespace::Namespace;
use crate::infrastructure::repository::{NoteEntry, NoteListing, NoteRepository, SkippedRecord};
use crate::infrastructure::storage::{is_staging_name, missing_as, write_atomic};
use chrono::{NaiveDateTime, SubsecRound};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// File system implementation of NoteRepository
#[derive(Debug, Clone)]
pub struct FileSystemNoteRepository {
    namespace: Namespace,
    policy: CollisionPolicy,
}

impl FileSystemNoteRepository {
    pub fn new(namespace: Namespace, policy: CollisionPolicy) -> Self {
        FileSystemNoteRepository { namespace, policy }
    }

    fn record_path(&self, id: &NoteId) -> PathBuf {
        self.namespace.notes_dir().join(id.file_name())
    }

    fn load(path: &Path, id: &NoteId) -> Result<Note> {
        let bytes = fs::read(path).map_err(missing_as("note", id.as_str()))?;
        serde_json::from_slice(&bytes).map_err(|e| VaultError::CorruptRecord {
            id: id.to_string(),
            reason: e.to_string(),
        })
    }

    fn save(&self, id: &NoteId, note: &Note) -> Result<()> {
        let json = serde_json::to_vec(note)?;
        write_atomic(&self.record_path(id), &json)?;
        Ok(())
    }

    /// First id derived from `base` that no record uses yet
    fn free_id(&self, base: NoteId) -> NoteId {
        if !self.record_path(&base).exists() {
            return base;
        }
        let mut n = 2;
        loop {
            let candidate = base.with_counter(n);
            if !self.record_path(&candidate).exists() {
                return candidate;
            }
            n += 1;
        }
    }

    /// Create a note as if the clock read `at`.
    ///
    /// Under [`CollisionPolicy::Overwrite`] a second note with the same
    /// sanitized title in the same second replaces the first.
    pub fn create_at(
        &self,
        title: &str,
        content: &str,
        color: &str,
        at: NaiveDateTime,
    ) -> Result<NoteId> {
        if title.is_empty() {
            return Err(VaultError::InvalidInput(
                "note title must not be empty".to_string(),
            ));
        }
        if content.is_empty() {
            return Err(VaultError::InvalidInput(
                "note content must not be empty".to_string(),
            ));
        }

        let at = at.trunc_subsecs(6);
        let generated = NoteId::generate(title, at);
        check_component("note title", generated.as_str())?;

        let _guard = self.namespace.lock();
        let id = match self.policy {
            CollisionPolicy::Overwrite => generated,
            CollisionPolicy::Disambiguate => self.free_id(generated),
        };

        let record = Note::new(title.to_string(), content.to_string(), color.to_string(), at);
        self.save(&id, &record)?;

        debug!(account = %self.namespace.account(), note = %id, "created note");
        Ok(id)
    }
}

impl NoteRepository for FileSystemNoteRepository {
    fn create(&self, title: &str, content: &str, color: &str) -> Result<NoteId> {
        self.create_at(title, content, color, note::now())
    }

    fn list(&self) -> Result<NoteListing> {
        let _guard = self.namespace.lock();
        let mut listing = NoteListing::default();

        for entry in fs::read_dir(self.namespace.notes_dir())? {
            let Ok(entry) = entry else {
                continue;
            };
            if !entry.file_type().is_ok_and(|t| t.is_file()) {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if is_staging_name(name) {
                continue;
            }
            let Some(id) = NoteId::from_file_name(name) else {
                continue;
            };

            match Self::load(&entry.path(), &id) {
                Ok(note) => listing.notes.push(NoteEntry { id, note }),
                Err(e) => {
                    warn!(account = %self.namespace.account(), note = %id, error = %e, "skipping unreadable note record");
                    listing.skipped.push(SkippedRecord {
                        id: id.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        // Newest first
        listing.notes.sort_by(|a, b| {
            b.note
                .time
                .cmp(&a.note.time)
                .then_with(|| a.id.cmp(&b.id))
        });
        listing.skipped.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(listing)
    }

    fn read(&self, id: &NoteId) -> Result<Note> {
        let _guard = self.namespace.lock();
        Self::load(&self.record_path(id), id)
    }

    fn update(&self, id: &NoteId, content: &str, color: &str) -> Result<Note> {
        if content.is_empty() {
            return Err(VaultError::InvalidInput(
                "note content must not be empty".to_string(),
            ));
        }

        let _guard = self.namespace.lock();
        let mut record = Self::load(&self.record_path(id), id)?;
        record.revise(content.to_string(), color.to_string(), note::now());
        self.save(id, &record)?;

        debug!(account = %self.namespace.account(), note = %id, "updated note");
        Ok(record)
    }

    fn delete(&self, id: &NoteId) -> Result<()> {
        let _guard = self.namespace.lock();
        fs::remove_file(self.record_path(id)).map_err(missing_as("note", id.as_str()))?;

        debug!(account = %self.namespace.account(), note = %id, "deleted note");
        Ok(())
    }
}
