//! Vault facade: the credential gate plus per-account note and blob operations

use crate::domain::{AccountId, BlobKind, Note, NoteId, Session};
use crate::error::Result;
use crate::infrastructure::{
    BlobRepository, Config, CredentialStore, FileSystemBlobRepository, FileSystemNoteRepository,
    NamespaceUsage, NoteListing, NoteRepository, PasswordHasher, Sha256Hasher, VaultNamespace,
};
use std::path::{Path, PathBuf};

/// Default vault root, relative to the working directory
pub const DEFAULT_ROOT: &str = "vault_users";

/// A vault root holding the credential registry and every account namespace
pub struct Vault<H: PasswordHasher = Sha256Hasher> {
    root: PathBuf,
    config: Config,
    credentials: CredentialStore<H>,
}

impl Vault<Sha256Hasher> {
    /// Open the vault at `root`. Nothing is created until an account is registered.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        Self::with_hasher(root, Sha256Hasher)
    }
}

impl<H: PasswordHasher> Vault<H> {
    pub fn with_hasher(root: impl Into<PathBuf>, hasher: H) -> Result<Self> {
        let root = root.into();
        let config = Config::load_from_dir(&root)?;

        Ok(Vault {
            credentials: CredentialStore::with_hasher(root.clone(), hasher),
            root,
            config,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn credentials(&self) -> &CredentialStore<H> {
        &self.credentials
    }

    pub fn register(&self, id: &str, password: &str) -> Result<AccountId> {
        self.credentials.register(id, password)
    }

    pub fn authenticate(&self, id: &str, password: &str) -> Result<AccountId> {
        self.credentials.authenticate(id, password)
    }

    /// Authenticate and move `session` to `LoggedIn`.
    /// A failed attempt leaves the session untouched.
    pub fn login(&self, session: &mut Session, id: &str, password: &str) -> Result<AccountId> {
        let account = self.authenticate(id, password)?;
        session.login(account.clone());
        tracing::debug!(account = %account, "session logged in");
        Ok(account)
    }

    pub fn logout(&self, session: &mut Session) -> Option<AccountId> {
        let account = session.logout();
        if let Some(account) = &account {
            tracing::debug!(account = %account, "session logged out");
        }
        account
    }

    /// Open the logged in account's namespace
    pub fn account(&self, session: &Session) -> Result<AccountVault> {
        let account = session.account()?;
        let namespace = VaultNamespace::open(&self.root, account)?;

        Ok(AccountVault::new(
            account.clone(),
            Box::new(FileSystemNoteRepository::new(
                namespace.clone(),
                self.config.id_collision,
            )),
            Box::new(FileSystemBlobRepository::new(
                namespace.clone(),
                BlobKind::Files,
            )),
            Box::new(FileSystemBlobRepository::new(namespace, BlobKind::Images)),
        ))
    }

    /// Entry counts and stored bytes of the logged in account
    pub fn usage(&self, session: &Session) -> Result<NamespaceUsage> {
        VaultNamespace::open(&self.root, session.account()?)?.usage()
    }
}

/// Operations of one authenticated account, confined to its namespace
pub struct AccountVault {
    account: AccountId,
    notes: Box<dyn NoteRepository>,
    files: Box<dyn BlobRepository>,
    images: Box<dyn BlobRepository>,
}

impl AccountVault {
    /// Assemble an account view from any repository implementations
    pub fn new(
        account: AccountId,
        notes: Box<dyn NoteRepository>,
        files: Box<dyn BlobRepository>,
        images: Box<dyn BlobRepository>,
    ) -> Self {
        AccountVault {
            account,
            notes,
            files,
            images,
        }
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn notes(&self) -> &dyn NoteRepository {
        self.notes.as_ref()
    }

    pub fn blobs(&self, kind: BlobKind) -> &dyn BlobRepository {
        match kind {
            BlobKind::Files => self.files.as_ref(),
            BlobKind::Images => self.images.as_ref(),
        }
    }

    pub fn create_note(&self, title: &str, content: &str, color: &str) -> Result<NoteId> {
        self.notes.create(title, content, color)
    }

    pub fn list_notes(&self) -> Result<NoteListing> {
        self.notes.list()
    }

    pub fn read_note(&self, id: &str) -> Result<Note> {
        self.notes.read(&NoteId::parse(id)?)
    }

    pub fn update_note(&self, id: &str, content: &str, color: &str) -> Result<Note> {
        self.notes.update(&NoteId::parse(id)?, content, color)
    }

    pub fn delete_note(&self, id: &str) -> Result<()> {
        self.notes.delete(&NoteId::parse(id)?)
    }

    pub fn store_blob(&self, kind: BlobKind, name: &str, bytes: &[u8]) -> Result<()> {
        self.blobs(kind).store(name, bytes)
    }

    pub fn list_blobs(&self, kind: BlobKind) -> Result<Vec<String>> {
        self.blobs(kind).list()
    }

    pub fn fetch_blob(&self, kind: BlobKind, name: &str) -> Result<Vec<u8>> {
        self.blobs(kind).fetch(name)
    }

    pub fn delete_blob(&self, kind: BlobKind, name: &str) -> Result<()> {
        self.blobs(kind).delete(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaultError;
    use tempfile::TempDir;

    fn logged_in(vault: &Vault, id: &str) -> Session {
        vault.register(id, "pw").unwrap();
        let mut session = Session::new();
        vault.login(&mut session, id, "pw").unwrap();
        session
    }

    #[test]
    fn test_open_does_not_create_root() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("nested").join("vault");
        let vault = Vault::open(&root).unwrap();
        assert_eq!(vault.config(), &Config::default());

        let mut session = Session::new();
        assert!(matches!(
            vault.login(&mut session, "alice", "pw"),
            Err(VaultError::InvalidCredentials)
        ));
        assert!(!root.exists());

        vault.register("alice", "pw").unwrap();
        assert!(root.join("alice/notes").is_dir());
    }

    #[test]
    fn test_login_transitions_session() {
        let temp = TempDir::new().unwrap();
        let vault = Vault::open(temp.path()).unwrap();
        vault.register("alice", "pw").unwrap();

        let mut session = Session::new();
        assert!(vault.login(&mut session, "alice", "nope").is_err());
        assert_eq!(session, Session::LoggedOut);

        vault.login(&mut session, "alice", "pw").unwrap();
        assert!(session.is_logged_in());

        assert_eq!(vault.logout(&mut session).unwrap().as_str(), "alice");
        assert!(matches!(
            vault.account(&session),
            Err(VaultError::NotAuthenticated)
        ));
    }

    #[test]
    fn test_account_operations_are_scoped() {
        let temp = TempDir::new().unwrap();
        let vault = Vault::open(temp.path()).unwrap();
        let alice = vault.account(&logged_in(&vault, "alice")).unwrap();
        let bob = vault.account(&logged_in(&vault, "bob")).unwrap();

        let id = alice.create_note("Secret", "alice only", "#fff").unwrap();
        alice.store_blob(BlobKind::Files, "a.txt", b"alice").unwrap();

        assert!(bob.list_notes().unwrap().is_empty());
        assert!(matches!(
            bob.read_note(id.as_str()),
            Err(VaultError::NotFound { .. })
        ));
        assert!(bob.list_blobs(BlobKind::Files).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_note_id_is_invalid_input() {
        let temp = TempDir::new().unwrap();
        let vault = Vault::open(temp.path()).unwrap();
        let alice = vault.account(&logged_in(&vault, "alice")).unwrap();

        assert!(matches!(
            alice.read_note("../../bob/notes/x"),
            Err(VaultError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_collision_policy_comes_from_config() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            id_collision: crate::domain::CollisionPolicy::Disambiguate,
            ..Config::default()
        };
        config.save_to_dir(temp.path()).unwrap();

        let vault = Vault::open(temp.path()).unwrap();
        assert_eq!(
            vault.config().id_collision,
            crate::domain::CollisionPolicy::Disambiguate
        );
    }

    #[test]
    fn test_usage() {
        let temp = TempDir::new().unwrap();
        let vault = Vault::open(temp.path()).unwrap();
        let session = logged_in(&vault, "alice");
        let alice = vault.account(&session).unwrap();

        alice.create_note("A", "hello", "#fff").unwrap();
        alice.store_blob(BlobKind::Images, "cat.png", b"1234").unwrap();

        let usage = vault.usage(&session).unwrap();
        assert_eq!(usage.notes, 1);
        assert_eq!(usage.files, 0);
        assert_eq!(usage.images, 1);
        assert!(usage.bytes > 4);
    }
}
