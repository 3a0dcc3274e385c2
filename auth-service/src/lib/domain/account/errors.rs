use auth::PasswordError;
use auth::TokenError;
use auth::WeakPasswordError;
use thiserror::Error;

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Error for Profile validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

/// Error surfaced by a credential store adapter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("Record already exists: {0}")]
    Conflict(String),

    #[error("Account not found in store: {0}")]
    Missing(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Top-level error for all authentication operations
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    // Input validation errors
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Weak password: {0}")]
    WeakPassword(#[from] WeakPasswordError),

    // Domain-level errors
    #[error("Email already registered: {0}")]
    AlreadyRegistered(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Account is locked. Try again in {retry_after_minutes} minutes")]
    AccountLocked { retry_after_minutes: i64 },

    #[error("Invalid credentials. {remaining_attempts} attempts remaining before lock")]
    InvalidCredentials { remaining_attempts: u32 },

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] TokenError),

    #[error("Session is no longer active")]
    SessionRevoked,

    // Infrastructure errors
    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}
