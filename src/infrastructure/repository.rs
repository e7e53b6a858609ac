//! Repository abstractions over a namespace's notes and blobs

use crate::domain::{BlobKind, Note, NoteId};
use crate::error::Result;

/// A note together with its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteEntry {
    pub id: NoteId,
    pub note: Note,
}

/// A stored record that could not be loaded during a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub id: String,
    pub reason: String,
}

/// Result of listing a note namespace.
///
/// Unreadable records never fail the listing; they end up in `skipped`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteListing {
    pub notes: Vec<NoteEntry>,
    pub skipped: Vec<SkippedRecord>,
}

impl NoteListing {
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn find(&self, id: &NoteId) -> Option<&NoteEntry> {
        self.notes.iter().find(|entry| &entry.id == id)
    }
}

/// CRUD over the note records of one namespace
pub trait NoteRepository: Send + Sync {
    /// Store a new note and return its generated id
    fn create(&self, title: &str, content: &str, color: &str) -> Result<NoteId>;

    /// All readable notes, newest first, plus the records that were skipped
    fn list(&self) -> Result<NoteListing>;

    fn read(&self, id: &NoteId) -> Result<Note>;

    /// Replace content and color; the title is kept and the time advances
    fn update(&self, id: &NoteId, content: &str, color: &str) -> Result<Note>;

    fn delete(&self, id: &NoteId) -> Result<()>;
}

/// CRUD over the raw blobs of one namespace subarea
pub trait BlobRepository: Send + Sync {
    fn kind(&self) -> BlobKind;

    /// Write `bytes` under `name`, replacing any blob with that name
    fn store(&self, name: &str, bytes: &[u8]) -> Result<()>;

    fn list(&self) -> Result<Vec<String>>;

    fn fetch(&self, name: &str) -> Result<Vec<u8>>;

    fn delete(&self, name: &str) -> Result<()>;
}
