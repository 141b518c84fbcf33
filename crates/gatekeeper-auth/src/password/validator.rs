//! Password policy enforcement.

use gatekeeper_core::config::AuthConfig;
use gatekeeper_core::error::AppError;

/// Validates password strength against the configured policy: a minimum
/// length, at least one letter and at least one digit.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length, in characters.
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self::with_min_length(config.password_min_length)
    }

    /// Creates a validator with an explicit minimum length.
    pub fn with_min_length(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Returns `Ok(())` if the password meets every rule, or a
    /// `WeakPassword` error describing the first violation.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::weak_password(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        if !password.chars().any(|c| c.is_ascii_alphabetic()) {
            return Err(AppError::weak_password(
                "Password must contain at least one letter (A-Z or a-z)",
            ));
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AppError::weak_password(
                "Password must contain at least one digit",
            ));
        }

        Ok(())
    }
}
