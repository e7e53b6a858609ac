//! Password digests

use sha2::{Digest, Sha256};

/// One-way password digest used by the credential registry.
///
/// Digests are stored as strings in `users.json`.
pub trait PasswordHasher: Send + Sync {
    fn digest(&self, password: &str) -> String;

    fn verify(&self, password: &str, stored: &str) -> bool {
        self.digest(password) == stored
    }
}

/// Unsalted, single round SHA-256 as lowercase hex.
///
/// Identical passwords give identical digests and the digest is fast to brute
/// force. Production use needs a salted, iterated KDF behind [`PasswordHasher`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl PasswordHasher for Sha256Hasher {
    fn digest(&self, password: &str) -> String {
        hex::encode(Sha256::digest(password.as_bytes()))
    }
}
