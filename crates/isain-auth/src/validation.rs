//! Input validation for sign-up and sign-in forms.
//!
//! Checks run in the order the forms present them and stop at the first
//! failure.

use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld`: no whitespace (U+FEFF included) or extra `@` in any part.
pub static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s\x{FEFF}@]+@[^\s\x{FEFF}@]+\.[^\s\x{FEFF}@]+$").expect("Invalid regex")
});

/// Minimum display name length, in UTF-16 code units.
pub const MIN_NAME_LENGTH: usize = 2;

/// Minimum password length, in UTF-16 code units.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Length as browser forms count it: characters outside the BMP count twice.
fn form_length(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Validate a display name.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if form_length(name) < MIN_NAME_LENGTH {
        return Err(ValidationError::NameTooShort);
    }
    Ok(())
}

/// Validate an email address shape.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// Validate a new password: length first, then character classes.
pub fn validate_new_password(password: &str) -> Result<(), ValidationError> {
    if form_length(password) < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !(has_lower && has_upper && has_digit) {
        return Err(ValidationError::PasswordTooWeak);
    }
    Ok(())
}

/// Validate that a sign-in password was supplied.
pub fn validate_password_present(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::PasswordMissing);
    }
    Ok(())
}

/// Validate a full registration form.
pub fn validate_registration(name: &str, email: &str, password: &str) -> Result<(), ValidationError> {
    validate_name(name)?;
    validate_email(email)?;
    validate_new_password(password)
}
