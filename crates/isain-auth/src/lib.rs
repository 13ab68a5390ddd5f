//! Identity management for Isain.
//!
//! This crate provides:
//! - **Accounts**: registration with name, email and password rules
//! - **Credentials**: per-email password records
//! - **Sessions**: a single signed-in account, restored on startup
//! - **Notifications**: user-facing success/error messages
//! - **Ratings**: 1-5 star destination ratings for signed-in users
//! - **Profile**: summary of the signed-in account
//!
//! All state lives in an [`isain_storage::KvStore`]; there is no server.
//! Passwords are stored in plaintext, so the store must be treated as
//! secret.
//!
//! # Example
//!
//! ```
//! use isain_auth::{IdentityManager, ProfileSummary, TracingNotifier};
//! use isain_storage::MemoryStore;
//!
//! let manager = IdentityManager::new(MemoryStore::new(), TracingNotifier);
//!
//! // Sign up (also signs in)
//! assert!(manager.register("Jane Doe", "jane@example.com", "Abcdef12"));
//!
//! // Rate a destination
//! assert!(manager.ratings().rate("santorini", 5));
//!
//! // Show the profile
//! let account = manager.current_session().unwrap();
//! let rated = manager.ratings().rated_count().unwrap();
//! let profile = ProfileSummary::for_account(&account, rated, chrono::Utc::now());
//! assert_eq!(profile.destinations_rated, 1);
//!
//! // Sign out
//! manager.end_session();
//! assert!(!manager.is_authenticated());
//! ```

mod account;
mod error;
mod manager;
mod notify;
mod profile;
mod rating;
mod validation;
mod vault;

pub use account::{allocate_id, Account};
pub use error::{AuthError, Result, ValidationError};
pub use manager::{IdentityManager, PASSWORDS_KEY, SESSION_KEY, USERS_KEY};
pub use notify::{Notification, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use profile::ProfileSummary;
pub use rating::{RatingLedger, RATINGS_KEY, STAR_RANGE};
pub use validation::{
    validate_email, validate_name, validate_new_password, validate_password_present,
    validate_registration, EMAIL_REGEX, MIN_NAME_LENGTH, MIN_PASSWORD_LENGTH,
};
pub use vault::CredentialVault;
