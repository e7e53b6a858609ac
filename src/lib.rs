//! notevault - Personal vault for notes, files and images
//!
//! Accounts are registered in a credential registry; each account gets a
//! private namespace holding JSON note records and raw uploaded blobs.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;

pub use application::{AccountVault, Vault};
pub use domain::{AccountId, BlobKind, Note, NoteId, Session};
pub use error::VaultError;
