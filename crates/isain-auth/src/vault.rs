//! Credential records.
//!
//! Passwords are kept in plaintext, keyed by email, separately from the
//! account list. This matches the existing on-device data and is NOT safe
//! for anything beyond a demo: anyone with access to the store can read
//! every password.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from email to plaintext password.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialVault {
    entries: BTreeMap<String, String>,
}

impl CredentialVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the password for `email`, replacing any previous one.
    pub fn insert(&mut self, email: String, password: String) {
        self.entries.insert(email, password);
    }

    /// Check `password` against the record for `email`.
    ///
    /// A missing record never verifies.
    pub fn verify(&self, email: &str, password: &str) -> bool {
        self.entries.get(email).is_some_and(|stored| stored == password)
    }

    /// Check if a record exists for `email`.
    pub fn contains(&self, email: &str) -> bool {
        self.entries.contains_key(email)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the vault holds no records.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vault_verify() {
        let mut vault = CredentialVault::new();
        vault.insert("jane@example.com".into(), "Abcdef12".into());

        assert!(vault.verify("jane@example.com", "Abcdef12"));
        assert!(!vault.verify("jane@example.com", "abcdef12"));
        assert!(!vault.verify("Jane@example.com", "Abcdef12"));
        assert!(!vault.verify("nobody@example.com", ""));
    }

    #[test]
    fn test_vault_is_a_plain_json_object() {
        let mut vault = CredentialVault::new();
        vault.insert("a@b.co".into(), "Secret12".into());

        let json = serde_json::to_string(&vault).unwrap();
        assert_eq!(json, r#"{"a@b.co":"Secret12"}"#);

        let restored: CredentialVault = serde_json::from_str(&json).unwrap();
        assert!(restored.contains("a@b.co"));
        assert_eq!(restored.len(), 1);
    }
}
