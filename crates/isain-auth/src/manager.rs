//! The identity manager: sign-up, sign-in, sign-out and session restore.
//!
//! The manager owns three keys in the backing store:
//! - `users`: the account collection, in registration order
//! - `passwords`: the [`CredentialVault`]
//! - `currentUser`: the signed-in account, absent when anonymous
//!
//! Each operation runs to completion against the store before returning.
//! Nothing coordinates overlapping calls: two concurrent registrations for
//! the same email may both pass the uniqueness check. The manager targets a
//! single interactive user.

use crate::{
    account::{allocate_id, Account},
    error::{AuthError, Result},
    notify::Notifier,
    rating::RatingLedger,
    validation::{validate_email, validate_password_present, validate_registration},
    vault::CredentialVault,
};
use chrono::{SubsecRound, Utc};
use isain_storage::{get_json, set_json, KvStore};
use parking_lot::RwLock;

/// Storage key for the account collection.
pub const USERS_KEY: &str = "users";
/// Storage key for the credential records.
pub const PASSWORDS_KEY: &str = "passwords";
/// Storage key for the current session.
pub const SESSION_KEY: &str = "currentUser";

const REGISTERED: &str = "Account created successfully!";
const REGISTER_FAILED: &str = "Failed to create account";
const SIGNED_IN: &str = "Welcome back!";
const SIGN_IN_FAILED: &str = "Failed to sign in";
const SIGNED_OUT: &str = "Signed out successfully";

/// Registers accounts, authenticates credentials, and tracks the session.
///
/// Construct one per running client and share it (e.g. behind an `Arc`)
/// with whatever renders forms and pages.
///
/// # Example
///
/// ```
/// use isain_auth::{IdentityManager, RecordingNotifier};
/// use isain_storage::MemoryStore;
///
/// let manager = IdentityManager::new(MemoryStore::new(), RecordingNotifier::new());
///
/// assert!(manager.register("Jane Doe", "jane@example.com", "Abcdef12"));
/// assert!(manager.authenticate("jane@example.com", "Abcdef12"));
/// assert_eq!(manager.current_session().unwrap().email, "jane@example.com");
///
/// manager.end_session();
/// assert!(!manager.is_authenticated());
/// ```
pub struct IdentityManager<S, N> {
    store: S,
    notifier: N,
    session: RwLock<Option<Account>>,
}

impl<S: KvStore, N: Notifier> IdentityManager<S, N> {
    /// Create a manager, restoring any persisted session from `store`.
    pub fn new(store: S, notifier: N) -> Self {
        let session = Self::restore_session(&store);
        Self {
            store,
            notifier,
            session: RwLock::new(session),
        }
    }

    /// Read `currentUser` once at startup.
    ///
    /// Unreadable data, or a session whose email is no longer registered,
    /// restores as anonymous. The stale key is left in place; the next
    /// sign-in overwrites it and the next sign-out removes it.
    fn restore_session(store: &S) -> Option<Account> {
        let stored = match get_json::<Account, _>(store, SESSION_KEY) {
            Ok(Some(account)) => account,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored session, starting signed out");
                return None;
            }
        };

        let users = match get_json::<Vec<Account>, _>(store, USERS_KEY) {
            Ok(users) => users.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read accounts, starting signed out");
                return None;
            }
        };

        match users.into_iter().find(|u| u.email == stored.email) {
            Some(account) => {
                tracing::debug!(email = %account.email, "Restored session");
                Some(account)
            }
            None => {
                tracing::warn!(email = %stored.email, "Stored session has no matching account, ignoring it");
                None
            }
        }
    }

    // ==================== Queries ====================

    /// The signed-in account, if any.
    pub fn current_session(&self) -> Option<Account> {
        self.session.read().clone()
    }

    /// Returns true while an account is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_some()
    }

    /// All registered accounts, in registration order.
    pub fn accounts(&self) -> Result<Vec<Account>> {
        self.load_users()
    }

    /// The store this manager persists to.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The notification sink.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Destination ratings, gated on this manager's session.
    pub fn ratings(&self) -> RatingLedger<'_, S, N> {
        RatingLedger::new(self)
    }

    // ==================== Operations ====================

    /// Register a new account and sign it in.
    ///
    /// Reports the outcome to the notifier and returns whether it succeeded.
    pub fn register(&self, name: &str, email: &str, password: &str) -> bool {
        match self.try_register(name, email, password) {
            Ok(account) => {
                tracing::info!(id = %account.id, email = %account.email, "Account registered");
                self.notifier.success(REGISTERED);
                true
            }
            Err(e) => {
                self.report(&e, REGISTER_FAILED);
                false
            }
        }
    }

    /// Register a new account and sign it in, returning the structured error
    /// on failure. Nothing is written unless every check passes.
    pub fn try_register(&self, name: &str, email: &str, password: &str) -> Result<Account> {
        validate_registration(name, email, password)?;

        let mut users = self.load_users()?;
        if users.iter().any(|u| u.email == email) {
            return Err(AuthError::Conflict(email.to_string()));
        }
        let mut vault = self.load_vault()?;

        // Stored timestamps carry milliseconds only.
        let now = Utc::now().trunc_subsecs(3);
        let account = Account::new(allocate_id(&users, now), name.to_string(), email.to_string(), now);

        vault.insert(email.to_string(), password.to_string());
        set_json(&self.store, PASSWORDS_KEY, &vault)?;

        users.push(account.clone());
        set_json(&self.store, USERS_KEY, &users)?;

        self.begin_session(&account)?;
        Ok(account)
    }

    /// Sign in with an email and password.
    ///
    /// Reports the outcome to the notifier and returns whether it succeeded.
    pub fn authenticate(&self, email: &str, password: &str) -> bool {
        match self.try_authenticate(email, password) {
            Ok(account) => {
                tracing::info!(id = %account.id, email = %account.email, "Signed in");
                self.notifier.success(SIGNED_IN);
                true
            }
            Err(e) => {
                self.report(&e, SIGN_IN_FAILED);
                false
            }
        }
    }

    /// Sign in, returning the structured error on failure.
    pub fn try_authenticate(&self, email: &str, password: &str) -> Result<Account> {
        validate_email(email)?;
        validate_password_present(password)?;

        let users = self.load_users()?;
        let account = users
            .into_iter()
            .find(|u| u.email == email)
            .ok_or_else(|| AuthError::NotFound(email.to_string()))?;

        if !self.load_vault()?.verify(email, password) {
            return Err(AuthError::Credential);
        }

        self.begin_session(&account)?;
        Ok(account)
    }

    /// Sign out. Safe to call when nobody is signed in.
    pub fn end_session(&self) {
        if let Err(e) = self.store.remove(SESSION_KEY) {
            tracing::warn!(error = %e, "Failed to remove stored session");
        }

        if let Some(account) = self.session.write().take() {
            tracing::info!(email = %account.email, "Signed out");
        }
        self.notifier.success(SIGNED_OUT);
    }

    // ==================== Internals ====================

    fn begin_session(&self, account: &Account) -> Result<()> {
        set_json(&self.store, SESSION_KEY, account)?;
        *self.session.write() = Some(account.clone());
        Ok(())
    }

    fn load_users(&self) -> Result<Vec<Account>> {
        Ok(get_json(&self.store, USERS_KEY)?.unwrap_or_default())
    }

    fn load_vault(&self) -> Result<CredentialVault> {
        Ok(get_json(&self.store, PASSWORDS_KEY)?.unwrap_or_default())
    }

    fn report(&self, err: &AuthError, fallback: &str) {
        if err.is_user_correctable() {
            tracing::debug!(error = %err, "Rejected");
            self.notifier.error(&err.to_string());
        } else {
            tracing::error!(error = %err, "Storage failure");
            self.notifier.error(fallback);
        }
    }
}

impl<S, N> std::fmt::Debug for IdentityManager<S, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityManager")
            .field("session", &*self.session.read())
            .finish_non_exhaustive()
    }
}
