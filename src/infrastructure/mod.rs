//! Infrastructure layer - External I/O and persistence

pub mod blob_store;
pub mod config;
pub mod credentials;
pub mod hasher;
pub mod namespace;
pub mod note_store;
pub mod repository;
pub mod storage;

pub use blob_store::FileSystemBlobRepository;
pub use config::Config;
pub use credentials::CredentialStore;
pub use hasher::{PasswordHasher, Sha256Hasher};
pub use namespace::{Namespace, NamespaceUsage, VaultNamespace};
pub use note_store::FileSystemNoteRepository;
pub use repository::{BlobRepository, NoteEntry, NoteListing, NoteRepository, SkippedRecord};
