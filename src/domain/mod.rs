//! Domain layer - Accounts, notes, blobs and sessions

pub mod account;
pub mod blob;
pub mod note;
pub mod path_component;
pub mod session;

pub use account::AccountId;
pub use blob::BlobKind;
pub use note::{CollisionPolicy, Note, NoteId};
pub use session::Session;
