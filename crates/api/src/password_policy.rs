// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy validation.
//!
//! This module enforces password requirements for account registration.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters long")]
    TooShort { min_length: usize },

    /// Password does not meet complexity requirements.
    #[error(
        "Password must contain at least {required} of the following: uppercase letter, lowercase letter, digit, symbol (found {found})"
    )]
    InsufficientComplexity { required: usize, found: usize },

    /// Password matches a forbidden value.
    #[error("Password must not match {field}")]
    MatchesForbiddenField { field: String },

    /// Password and confirmation do not match.
    #[error("Password and confirmation do not match")]
    ConfirmationMismatch,
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length.
    pub min_length: usize,
    /// Minimum number of character classes required (out of 4).
    pub min_complexity: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: 8,
            min_complexity: 2,
        }
    }
}

impl PasswordPolicy {
    /// Validates a password against the policy.
    ///
    /// # Arguments
    ///
    /// * `password` - The password to validate
    /// * `confirmation` - The password confirmation
    /// * `username` - The login name (password must not match)
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the password does not meet
    /// policy requirements.
    pub fn validate(
        &self,
        password: &str,
        confirmation: &str,
        username: &str,
    ) -> Result<(), PasswordPolicyError> {
        if password != confirmation {
            return Err(PasswordPolicyError::ConfirmationMismatch);
        }

        if password.len() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        let has_upper: bool = password.chars().any(char::is_uppercase);
        let has_lower: bool = password.chars().any(char::is_lowercase);
        let has_digit: bool = password.chars().any(|c| c.is_ascii_digit());
        let has_symbol: bool = password.chars().any(|c| !c.is_alphanumeric());

        let found: usize = usize::from(has_upper)
            + usize::from(has_lower)
            + usize::from(has_digit)
            + usize::from(has_symbol);
        if found < self.min_complexity {
            return Err(PasswordPolicyError::InsufficientComplexity {
                required: self.min_complexity,
                found,
            });
        }

        if !username.is_empty() && password.eq_ignore_ascii_case(username) {
            return Err(PasswordPolicyError::MatchesForbiddenField {
                field: String::from("username"),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_reasonable_password() {
        let policy: PasswordPolicy = PasswordPolicy::default();
        assert!(
            policy
                .validate("tangerine42", "tangerine42", "student1")
                .is_ok()
        );
    }

    #[test]
    fn test_rejects_short_password() {
        let policy: PasswordPolicy = PasswordPolicy::default();
        let result = policy.validate("ab1", "ab1", "student1");
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_rejects_single_class_password() {
        let policy: PasswordPolicy = PasswordPolicy::default();
        let result = policy.validate("abcdefgh", "abcdefgh", "student1");
        assert!(matches!(
            result,
            Err(PasswordPolicyError::InsufficientComplexity { .. })
        ));
    }

    #[test]
    fn test_rejects_mismatched_confirmation() {
        let policy: PasswordPolicy = PasswordPolicy::default();
        let result = policy.validate("tangerine42", "tangerine43", "student1");
        assert!(matches!(
            result,
            Err(PasswordPolicyError::ConfirmationMismatch)
        ));
    }

    #[test]
    fn test_rejects_password_equal_to_username() {
        let policy: PasswordPolicy = PasswordPolicy::default();
        let result = policy.validate("Student42", "Student42", "student42");
        assert!(matches!(
            result,
            Err(PasswordPolicyError::MatchesForbiddenField { .. })
        ));
    }
}
