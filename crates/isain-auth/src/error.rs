//! Error types for the auth crate.
//!
//! The `Display` text of every user-correctable variant is the message
//! shown to the user, so callers can forward `err.to_string()` as-is.

use isain_storage::StorageError;
use thiserror::Error;

/// Malformed input rejected before any storage is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Display name is empty or shorter than two characters.
    #[error("Name must be at least 2 characters long")]
    NameTooShort,

    /// Email is empty or not shaped like `local@domain.tld`.
    #[error("Please enter a valid email address")]
    InvalidEmail,

    /// Password is empty or shorter than eight characters.
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,

    /// Password lacks a lowercase letter, an uppercase letter or a digit.
    #[error("Password must contain uppercase, lowercase, and number")]
    PasswordTooWeak,

    /// No password supplied at sign-in.
    #[error("Please enter your password")]
    PasswordMissing,

    /// Star rating outside 1..=5.
    #[error("Rating must be between 1 and 5 stars")]
    RatingOutOfRange,
}

/// Errors that can occur in identity operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid input was provided.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An account already exists for this email.
    #[error("An account with this email already exists")]
    Conflict(String),

    /// No account is registered under this email.
    #[error("No account found with this email")]
    NotFound(String),

    /// The password does not match the stored credential.
    #[error("Incorrect password")]
    Credential,

    /// The operation requires an authenticated session.
    #[error("Please sign in to rate destinations")]
    SignInRequired,

    /// Storage could not be read, parsed or written.
    #[error("unexpected storage failure: {0}")]
    Unexpected(#[from] StorageError),
}

impl AuthError {
    /// Returns true if the user can fix this by changing their input.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(self, AuthError::Unexpected(_))
    }
}

/// Result type for auth operations.
pub type Result<T> = std::result::Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_distinct() {
        let messages = [
            AuthError::from(ValidationError::NameTooShort).to_string(),
            AuthError::from(ValidationError::InvalidEmail).to_string(),
            AuthError::from(ValidationError::PasswordTooShort).to_string(),
            AuthError::from(ValidationError::PasswordTooWeak).to_string(),
            AuthError::from(ValidationError::PasswordMissing).to_string(),
            AuthError::Conflict("a@b.co".into()).to_string(),
            AuthError::NotFound("a@b.co".into()).to_string(),
            AuthError::Credential.to_string(),
        ];

        let unique: std::collections::HashSet<_> = messages.iter().collect();
        assert_eq!(unique.len(), messages.len());
    }

    #[test]
    fn test_storage_errors_are_not_user_correctable() {
        let err = AuthError::from(StorageError::Corruption("users".into()));
        assert!(!err.is_user_correctable());
        assert!(AuthError::Credential.is_user_correctable());
    }
}
