use super::errors::WeakPasswordError;

/// Characters accepted as the required special character.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Character-class rules for new passwords.
///
/// Requires a minimum length plus at least one uppercase letter, one
/// lowercase letter, one digit and one of [`SPECIAL_CHARACTERS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    min_length: usize,
}

impl PasswordStrength {
    pub const DEFAULT_MIN_LENGTH: usize = 8;

    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    /// Check a candidate password, reporting the first rule it breaks.
    pub fn check(&self, password: &str) -> Result<(), WeakPasswordError> {
        if password.chars().count() < self.min_length {
            return Err(WeakPasswordError::TooShort {
                min: self.min_length,
            });
        }

        if !password.chars().any(|c| c.is_uppercase()) {
            return Err(WeakPasswordError::MissingUppercase);
        }

        if !password.chars().any(|c| c.is_lowercase()) {
            return Err(WeakPasswordError::MissingLowercase);
        }

        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(WeakPasswordError::MissingDigit);
        }

        if !password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) {
            return Err(WeakPasswordError::MissingSpecial);
        }

        Ok(())
    }
}

impl Default for PasswordStrength {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MIN_LENGTH)
    }
}
