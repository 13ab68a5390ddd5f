//! End-to-end tests for the identity manager over a durable file store.

use isain_auth::{
    AuthError, IdentityManager, RecordingNotifier, Severity, ValidationError, PASSWORDS_KEY,
    SESSION_KEY, USERS_KEY,
};
use isain_storage::{FileStore, KvStore};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

fn open(path: &Path) -> IdentityManager<FileStore, Arc<RecordingNotifier>> {
    IdentityManager::new(FileStore::open(path).unwrap(), Arc::new(RecordingNotifier::new()))
}

// ==================== Reload Tests ====================

#[test]
fn test_session_persists_across_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let manager = open(&path);
    assert!(manager.register("Jane Doe", "jane@example.com", "Abcdef12"));
    let account = manager.current_session().unwrap();
    drop(manager);

    // Reload: still signed in as the same account.
    let manager = open(&path);
    assert_eq!(manager.current_session(), Some(account));

    manager.end_session();
    drop(manager);

    // Reload: signed out, but the account still authenticates.
    let manager = open(&path);
    assert!(!manager.is_authenticated());
    assert!(manager.authenticate("jane@example.com", "Abcdef12"));
}

#[test]
fn test_storage_keys_have_expected_shape() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let manager = open(&path);
    manager.register("Jane Doe", "jane@example.com", "Abcdef12");

    let store = manager.store();
    let users: serde_json::Value = serde_json::from_str(&store.get(USERS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(users.as_array().unwrap().len(), 1);
    assert_eq!(users[0]["email"], "jane@example.com");
    assert!(users[0]["createdAt"].as_str().unwrap().ends_with('Z'));

    let passwords: serde_json::Value =
        serde_json::from_str(&store.get(PASSWORDS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(passwords["jane@example.com"], "Abcdef12");

    let session: serde_json::Value = serde_json::from_str(&store.get(SESSION_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(session, users[0]);
}

#[test]
fn test_failed_registration_keeps_users_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("store.json");

    let manager = open(&path);
    manager.register("Jane Doe", "jane@example.com", "Abcdef12");
    let before = manager.store().get(USERS_KEY).unwrap();

    assert!(!manager.register("A", "a@b.com", "Abcdef12"));
    assert_eq!(manager.store().get(USERS_KEY).unwrap(), before);

    let err = manager.try_register("A", "a@b.com", "Abcdef12").unwrap_err();
    assert!(matches!(err, AuthError::Validation(ValidationError::NameTooShort)));
}

// ==================== Notification Tests ====================

#[test]
fn test_notification_sequence() {
    let dir = TempDir::new().unwrap();
    let manager = open(&dir.path().join("store.json"));

    manager.register("Jane Doe", "jane@example.com", "Abcdef12");
    manager.register("Jane Doe", "jane@example.com", "Abcdef12");
    manager.end_session();
    manager.authenticate("jane@example.com", "nope");
    manager.authenticate("jane@example.com", "Abcdef12");
    manager.end_session();

    let delivered: Vec<(Severity, String)> = manager
        .notifier()
        .notifications()
        .into_iter()
        .map(|n| (n.severity, n.message))
        .collect();

    assert_eq!(
        delivered,
        vec![
            (Severity::Success, "Account created successfully!".to_string()),
            (Severity::Error, "An account with this email already exists".to_string()),
            (Severity::Success, "Signed out successfully".to_string()),
            (Severity::Error, "Incorrect password".to_string()),
            (Severity::Success, "Welcome back!".to_string()),
            (Severity::Success, "Signed out successfully".to_string()),
        ]
    );
}

// ==================== Shared Manager Tests ====================

#[test]
fn test_manager_shared_across_threads() {
    let dir = TempDir::new().unwrap();
    let manager = Arc::new(open(&dir.path().join("store.json")));
    manager.register("Jane Doe", "jane@example.com", "Abcdef12");

    let reader = {
        let manager = Arc::clone(&manager);
        std::thread::spawn(move || manager.current_session().map(|a| a.email))
    };
    assert_eq!(reader.join().unwrap().as_deref(), Some("jane@example.com"));
}
