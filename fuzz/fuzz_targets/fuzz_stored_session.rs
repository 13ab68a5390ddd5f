//! Fuzz target for session restore.
//!
//! Tests that arbitrary stored data never panics the manager at startup.

#![no_main]

use isain_auth::{IdentityManager, RecordingNotifier, SESSION_KEY, USERS_KEY};
use isain_storage::MemoryStore;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: (&str, &str)| {
    let (session, users) = data;
    let store = MemoryStore::with_entries([(SESSION_KEY, session), (USERS_KEY, users)]);

    let manager = IdentityManager::new(store, RecordingNotifier::new());
    if let Some(account) = manager.current_session() {
        // A restored session always names a registered account.
        let accounts = manager.accounts().unwrap();
        assert!(accounts.iter().any(|a| a.email == account.email));
    }
});
