// ============================
// crates/backend-lib/src/validation/mod.rs
// ============================
//! Submission field validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

// Common validation constants
const MAX_LOGIN_NAME_LENGTH: usize = 30;
const MAX_DISPLAY_NAME_LENGTH: usize = 100;
const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321 SMTP limit
const MAX_CONTACT_LENGTH: usize = 10;
const MAX_PASSWORD_LENGTH: usize = 128;

// Regex patterns for validation
static LOGIN_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").unwrap());
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap());
static CONTACT_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Result type for validation operations
pub type ValidationResult<'a> = Result<&'a str, AppError>;

/// Validate a login name
pub fn validate_login_name(login_name: &str) -> ValidationResult<'_> {
    if login_name.is_empty() {
        return Err(AppError::Validation("Username is empty".to_string()));
    }

    if login_name.len() > MAX_LOGIN_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Username cannot exceed {MAX_LOGIN_NAME_LENGTH} characters"
        )));
    }

    if !LOGIN_NAME_REGEX.is_match(login_name) {
        return Err(AppError::Validation(
            "Username must contain only letters, digits, dots, hyphens and underscores"
                .to_string(),
        ));
    }

    Ok(login_name)
}

/// Validate a display name
pub fn validate_display_name(display_name: &str) -> ValidationResult<'_> {
    if display_name.trim().is_empty() {
        return Err(AppError::Validation("Name is empty".to_string()));
    }

    if display_name.len() > MAX_DISPLAY_NAME_LENGTH {
        return Err(AppError::Validation(format!(
            "Name cannot exceed {MAX_DISPLAY_NAME_LENGTH} characters"
        )));
    }

    Ok(display_name)
}

/// Validate an email address
pub fn validate_email(email: &str) -> ValidationResult<'_> {
    if email.is_empty() {
        return Err(AppError::Validation("Email required".to_string()));
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(AppError::Validation(format!(
            "Email address cannot exceed {MAX_EMAIL_LENGTH} characters"
        )));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Err(AppError::Validation(
            "Invalid email address format".to_string(),
        ));
    }

    Ok(email)
}

/// Validate a contact number
pub fn validate_contact(contact: &str) -> ValidationResult<'_> {
    if contact.is_empty() {
        return Err(AppError::Validation("Contact required".to_string()));
    }

    if contact.len() > MAX_CONTACT_LENGTH {
        return Err(AppError::Validation(format!(
            "Contact length should be at most {MAX_CONTACT_LENGTH}"
        )));
    }

    if !CONTACT_REGEX.is_match(contact) {
        return Err(AppError::Validation(
            "Contact must contain only digits".to_string(),
        ));
    }

    Ok(contact)
}

/// Validate a password submission.
///
/// The core refuses to hash or store an absent password; composition rules
/// beyond presence are a front-end concern.
pub fn validate_password(password: &str) -> ValidationResult<'_> {
    if password.is_empty() {
        return Err(AppError::Validation("Password required".to_string()));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AppError::Validation(format!(
            "Password cannot exceed {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(password)
}
