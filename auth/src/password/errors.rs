use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}

/// A password rejected by [`PasswordStrength`](super::PasswordStrength).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeakPasswordError {
    #[error("Password must be at least {min} characters long")]
    TooShort { min: usize },

    #[error("Password must contain at least one uppercase letter")]
    MissingUppercase,

    #[error("Password must contain at least one lowercase letter")]
    MissingLowercase,

    #[error("Password must contain at least one digit")]
    MissingDigit,

    #[error("Password must contain at least one special character")]
    MissingSpecial,
}
