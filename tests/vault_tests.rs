//! Library-level tests of the vault operations

use chrono::NaiveDate;
use notevault::domain::{AccountId, BlobKind, CollisionPolicy, Session};
use notevault::error::VaultError;
use notevault::infrastructure::{FileSystemNoteRepository, NoteRepository, VaultNamespace};
use notevault::Vault;
use std::fs;
use tempfile::TempDir;

fn logged_in(vault: &Vault, id: &str) -> Session {
    vault.register(id, "pw").unwrap();
    let mut session = Session::new();
    vault.login(&mut session, id, "pw").unwrap();
    session
}

#[test]
fn test_register_then_authenticate() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();

    vault.register("alice", "s3cret").unwrap();

    assert_eq!(vault.authenticate("alice", "s3cret").unwrap().as_str(), "alice");
    assert!(matches!(
        vault.authenticate("alice", "wrong"),
        Err(VaultError::InvalidCredentials)
    ));
    assert!(matches!(
        vault.authenticate("mallory", "s3cret"),
        Err(VaultError::InvalidCredentials)
    ));
}

#[test]
fn test_duplicate_register_fails_regardless_of_password() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();

    vault.register("alice", "one").unwrap();
    assert!(matches!(
        vault.register("alice", "two"),
        Err(VaultError::DuplicateAccount(_))
    ));
    assert!(vault.authenticate("alice", "one").is_ok());
}

#[test]
fn test_create_then_list() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();
    let account = vault.account(&logged_in(&vault, "alice")).unwrap();

    account.create_note("A", "hello", "#ffffff").unwrap();

    let listing = account.list_notes().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing.notes[0].note.title, "A");
    assert_eq!(listing.notes[0].note.content, "hello");
    assert_eq!(listing.notes[0].note.color, "#ffffff");
    assert!(listing.skipped.is_empty());
}

#[test]
fn test_update_preserves_title_and_advances_time() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();
    let account = vault.account(&logged_in(&vault, "alice")).unwrap();

    let id = account.create_note("A", "hello", "#ffffff").unwrap();
    let before = account.read_note(id.as_str()).unwrap();

    let updated = account
        .update_note(id.as_str(), "new text", "#000000")
        .unwrap();
    assert_eq!(updated.title, "A");
    assert_eq!(updated.content, "new text");
    assert_eq!(updated.color, "#000000");
    assert!(updated.time > before.time);

    assert_eq!(account.read_note(id.as_str()).unwrap(), updated);
}

#[test]
fn test_delete_then_read_fails() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();
    let account = vault.account(&logged_in(&vault, "alice")).unwrap();

    let id = account.create_note("A", "hello", "#ffffff").unwrap();
    account.delete_note(id.as_str()).unwrap();

    assert!(matches!(
        account.read_note(id.as_str()),
        Err(VaultError::NotFound { kind: "note", .. })
    ));
    assert!(matches!(
        account.delete_note(id.as_str()),
        Err(VaultError::NotFound { .. })
    ));
}

#[test]
fn test_blob_store_replaces() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();
    let account = vault.account(&logged_in(&vault, "alice")).unwrap();

    account.store_blob(BlobKind::Files, "a.txt", b"one").unwrap();
    account.store_blob(BlobKind::Files, "a.txt", b"two").unwrap();

    assert_eq!(account.fetch_blob(BlobKind::Files, "a.txt").unwrap(), b"two");
    assert_eq!(account.list_blobs(BlobKind::Files).unwrap(), vec!["a.txt"]);
}

#[test]
fn test_same_second_titles_collide_by_default() {
    let temp = TempDir::new().unwrap();
    let account = AccountId::parse("alice").unwrap();
    let at = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_micro_opt(12, 0, 0, 100)
        .unwrap();
    let later = NaiveDate::from_ymd_opt(2025, 3, 1)
        .unwrap()
        .and_hms_micro_opt(12, 0, 0, 900_000)
        .unwrap();

    let overwrite = FileSystemNoteRepository::new(
        VaultNamespace::open(temp.path(), &account).unwrap(),
        CollisionPolicy::Overwrite,
    );
    let first = overwrite.create_at("Same", "first", "#fff", at).unwrap();
    let second = overwrite.create_at("Same", "second", "#fff", later).unwrap();

    assert_eq!(first, second);
    let listing = overwrite.list().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing.notes[0].note.content, "second");

    let disambiguate = FileSystemNoteRepository::new(
        VaultNamespace::open(temp.path(), &account).unwrap(),
        CollisionPolicy::Disambiguate,
    );
    let third = disambiguate.create_at("Same", "third", "#fff", at).unwrap();
    assert_ne!(third, first);
    assert_eq!(third.as_str(), format!("{}-2", first));
    assert_eq!(disambiguate.list().unwrap().len(), 2);
}

#[test]
fn test_empty_namespace_lists_nothing() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();
    let account = vault.account(&logged_in(&vault, "alice")).unwrap();

    assert!(account.list_notes().unwrap().is_empty());
    assert!(account.list_blobs(BlobKind::Files).unwrap().is_empty());
    assert!(account.list_blobs(BlobKind::Images).unwrap().is_empty());
}

#[test]
fn test_corrupt_record_is_skipped_and_reported() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();
    let account = vault.account(&logged_in(&vault, "alice")).unwrap();

    account.create_note("Good", "fine", "#fff").unwrap();
    fs::write(
        temp.path().join("alice/notes/bad_20250101000000.json"),
        br#"{"title": "bad""#,
    )
    .unwrap();

    let listing = account.list_notes().unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing.notes[0].note.title, "Good");
    assert_eq!(listing.skipped.len(), 1);
    assert_eq!(listing.skipped[0].id, "bad_20250101000000");
}

#[test]
fn test_accounts_are_isolated() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();
    let alice = vault.account(&logged_in(&vault, "alice")).unwrap();
    let bob = vault.account(&logged_in(&vault, "bob")).unwrap();

    let id = alice.create_note("Secret", "mine", "#fff").unwrap();
    alice.store_blob(BlobKind::Images, "me.png", b"png").unwrap();

    assert!(bob.list_notes().unwrap().is_empty());
    assert!(bob.read_note(id.as_str()).is_err());
    assert!(bob.list_blobs(BlobKind::Images).unwrap().is_empty());
    assert!(matches!(
        bob.fetch_blob(BlobKind::Images, "me.png"),
        Err(VaultError::NotFound { .. })
    ));
}

#[test]
fn test_logout_ends_session() {
    let temp = TempDir::new().unwrap();
    let vault = Vault::open(temp.path()).unwrap();
    let mut session = logged_in(&vault, "alice");

    assert!(vault.account(&session).is_ok());
    vault.logout(&mut session);

    assert_eq!(session, Session::LoggedOut);
    assert!(matches!(
        vault.account(&session),
        Err(VaultError::NotAuthenticated)
    ));
    assert!(matches!(
        vault.usage(&session),
        Err(VaultError::NotAuthenticated)
    ));
}
