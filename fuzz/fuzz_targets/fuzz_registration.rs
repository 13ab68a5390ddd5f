//! Fuzz target for registration and sign-in.
//!
//! Any accepted registration must be able to sign in with the same
//! credentials, and a rejected one must leave the store empty.

#![no_main]

use arbitrary::Arbitrary;
use isain_auth::{IdentityManager, RecordingNotifier};
use isain_storage::MemoryStore;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Form {
    name: String,
    email: String,
    password: String,
}

fuzz_target!(|form: Form| {
    let manager = IdentityManager::new(MemoryStore::new(), RecordingNotifier::new());

    if manager.register(&form.name, &form.email, &form.password) {
        manager.end_session();
        assert!(manager.authenticate(&form.email, &form.password));
        assert_eq!(manager.accounts().unwrap().len(), 1);
    } else {
        assert!(manager.store().is_empty());
        assert!(!manager.is_authenticated());
    }
});
