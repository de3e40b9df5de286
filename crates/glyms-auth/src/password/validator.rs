//! Password policy enforcement for new passwords.

use glyms_core::config::AuthConfig;
use glyms_core::error::AppError;

/// Validates password strength against configured policies.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    min_length: usize,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
        }
    }

    /// Checks length, then estimated strength.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < self.min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters long",
                self.min_length
            )));
        }

        let estimate = zxcvbn::zxcvbn(password, &[]);
        if estimate.score() < zxcvbn::Score::Two {
            return Err(AppError::validation(
                "Password is too easy to guess. Try a longer phrase or mix in unusual words.",
            ));
        }

        Ok(())
    }

    /// Validates that a new password differs from the old one.
    pub fn validate_not_same(&self, old_password: &str, new_password: &str) -> Result<(), AppError> {
        if old_password == new_password {
            return Err(AppError::validation(
                "New password must be different from the current password",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validator() -> PasswordValidator {
        PasswordValidator::new(&AuthConfig::default())
    }

    #[test]
    fn test_too_short() {
        assert!(validator().validate("a1!").is_err());
    }

    #[test]
    fn test_common_password_rejected() {
        assert!(validator().validate("password").is_err());
        assert!(validator().validate("12345678").is_err());
    }

    #[test]
    fn test_passphrase_accepted() {
        assert!(validator().validate("velvet-lantern-orbit-93").is_ok());
    }

    #[test]
    fn test_not_same() {
        assert!(validator().validate_not_same("a", "a").is_err());
        assert!(validator().validate_not_same("a", "b").is_ok());
    }
}
