//! Credential registry persisted as `users.json` in the vault root

use crate::domain::AccountId;
use crate::error::{Result, VaultError};
use crate::infrastructure::hasher::{PasswordHasher, Sha256Hasher};
use crate::infrastructure::namespace::VaultNamespace;
use crate::infrastructure::storage::write_atomic;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the registry file inside the vault root
pub const REGISTRY_FILE: &str = "users.json";

/// Account id -> password digest
type Registry = BTreeMap<String, String>;

/// Guards read-modify-write cycles on any registry in this process
static REGISTRY_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Registers accounts and verifies passwords
pub struct CredentialStore<H: PasswordHasher = Sha256Hasher> {
    root: PathBuf,
    hasher: H,
}

impl CredentialStore<Sha256Hasher> {
    pub fn new(root: PathBuf) -> Self {
        Self::with_hasher(root, Sha256Hasher)
    }
}

impl<H: PasswordHasher> CredentialStore<H> {
    pub fn with_hasher(root: PathBuf, hasher: H) -> Self {
        CredentialStore { root, hasher }
    }

    pub fn registry_path(&self) -> PathBuf {
        self.root.join(REGISTRY_FILE)
    }

    fn load(path: &Path) -> Result<Registry> {
        let contents = match fs::read(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Registry::new()),
            Err(e) => return Err(VaultError::Io(e)),
        };

        serde_json::from_slice(&contents).map_err(|e| VaultError::CorruptRecord {
            id: REGISTRY_FILE.to_string(),
            reason: e.to_string(),
        })
    }

    /// A registered account other than `account` whose directory is the one
    /// `account` would use (case-folding filesystems, symlinks).
    fn aliased_owner(&self, registry: &Registry, account: &AccountId) -> Option<String> {
        let dir = fs::canonicalize(self.root.join(account.as_str())).ok()?;
        registry
            .keys()
            .filter(|owner| owner.as_str() != account.as_str())
            .find(|owner| {
                fs::canonicalize(self.root.join(owner.as_str())).is_ok_and(|other| other == dir)
            })
            .cloned()
    }

    /// Rewrite the whole registry
    fn save(&self, registry: &Registry) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_vec(registry)?;
        write_atomic(&self.registry_path(), &json)?;
        Ok(())
    }

    /// Create an account and provision its empty namespace
    pub fn register(&self, id: &str, password: &str) -> Result<AccountId> {
        if id.is_empty() || password.is_empty() {
            return Err(VaultError::InvalidInput(
                "username and password are both required".to_string(),
            ));
        }
        let account = AccountId::parse(id)?;

        {
            let _guard = REGISTRY_LOCK.lock();
            let mut registry = Self::load(&self.registry_path())?;

            if registry.contains_key(account.as_str()) {
                return Err(VaultError::DuplicateAccount(account.to_string()));
            }
            if let Some(owner) = self.aliased_owner(&registry, &account) {
                return Err(VaultError::InvalidInput(format!(
                    "username '{}' resolves to the directory of existing account '{}'",
                    account, owner
                )));
            }

            registry.insert(account.to_string(), self.hasher.digest(password));
            self.save(&registry)?;
        }

        VaultNamespace::open(&self.root, &account)?;

        info!(account = %account, "registered account");
        Ok(account)
    }

    /// Verify a password, returning the account it unlocks
    pub fn authenticate(&self, id: &str, password: &str) -> Result<AccountId> {
        let registry = {
            let _guard = REGISTRY_LOCK.lock();
            Self::load(&self.registry_path())?
        };

        match registry.get(id) {
            Some(stored) if self.hasher.verify(password, stored) => {
                debug!(account = id, "authenticated");
                AccountId::parse(id)
            }
            _ => {
                debug!(account = id, "authentication failed");
                Err(VaultError::InvalidCredentials)
            }
        }
    }

    pub fn contains(&self, id: &str) -> Result<bool> {
        let _guard = REGISTRY_LOCK.lock();
        Ok(Self::load(&self.registry_path())?.contains_key(id))
    }

    /// Registered account ids in sorted order
    pub fn accounts(&self) -> Result<Vec<String>> {
        let _guard = REGISTRY_LOCK.lock();
        Ok(Self::load(&self.registry_path())?.into_keys().collect())
    }
}
