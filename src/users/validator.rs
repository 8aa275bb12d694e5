//! Login and password validation
//!
//! Checks the shape of logins and passwords before any record is created.
//! A login doubles as the name of the user's storage root directory and as
//! a cookie value, so it is restricted to a safe ASCII charset.

use crate::error::AuthError;

/// Performs basic input sanitation to check for malicious or malformed input.
fn is_valid_input(input: &str, max_length: usize) -> bool {
    !input.trim().is_empty() && input.len() <= max_length && !input.contains(['\r', '\n', '\0'])
}

fn is_login_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

/// Validates that a login is safe to use as a record key, directory name,
/// and cookie value.
pub fn validate_login(login: &str, max_length: usize) -> Result<(), AuthError> {
    if !is_valid_input(login, max_length) {
        return Err(AuthError::MalformedInput("Invalid login format".into()));
    }

    if !login.chars().all(is_login_char) || login.starts_with('.') {
        return Err(AuthError::MalformedInput("Invalid login format".into()));
    }

    Ok(())
}

/// Validates that a password is well-formed (not that it matches anything).
pub fn validate_password_shape(password: &str, max_length: usize) -> Result<(), AuthError> {
    if !is_valid_input(password, max_length) {
        return Err(AuthError::MalformedInput("Invalid password format".into()));
    }
    Ok(())
}
