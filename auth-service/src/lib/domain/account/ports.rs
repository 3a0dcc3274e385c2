use async_trait::async_trait;
use auth::PasswordError;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::account::errors::AuthError;
use crate::domain::account::errors::StoreError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::RegisterCommand;

/// Port for authentication service operations.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account.
    ///
    /// # Arguments
    /// * `command` - Validated email, plaintext password and profile fields
    ///
    /// # Returns
    /// Created account, unlocked with a zero failure counter
    ///
    /// # Errors
    /// * `WeakPassword` - Strength rules are enforced and the password fails them
    /// * `AlreadyRegistered` - Email is already registered
    /// * `Store` - Persistence failed
    async fn register(&self, command: RegisterCommand) -> Result<Account, AuthError>;

    /// Verify credentials, applying lockout, and open a session.
    ///
    /// # Arguments
    /// * `email` - Account identity
    /// * `password` - Plaintext password
    /// * `now` - Instant of the attempt
    ///
    /// # Returns
    /// Issued token, already registered as the account's active session
    ///
    /// # Errors
    /// * `UserNotFound` - No account for this email
    /// * `AccountLocked` - Account is inside its lock window
    /// * `InvalidCredentials` - Password does not match
    /// * `Store` - Persistence failed
    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginOutcome, AuthError>;

    /// Close the session bound to a token. Closing an absent session succeeds.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, badly signed or expired
    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Resolve a bearer token to the identity it was issued for.
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed, badly signed or expired
    /// * `SessionRevoked` - Token was superseded by a later login or logged out
    async fn authorize(&self, token: &str) -> Result<EmailAddress, AuthError>;

    /// Retrieve the account for an already-authorized identity.
    ///
    /// # Errors
    /// * `UserNotFound` - No account for this email
    /// * `Store` - Persistence failed
    async fn profile(&self, email: &EmailAddress) -> Result<Account, AuthError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Retrieve account by email address.
    ///
    /// # Returns
    /// Optional account (None if not found)
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError>;

    /// Check whether an account exists for an email address.
    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, StoreError>;

    /// Insert a new account.
    ///
    /// # Errors
    /// * `Conflict` - An account with this email already exists
    /// * `Database` - Storage operation failed
    async fn create(&self, account: Account) -> Result<Account, StoreError>;

    /// Persist changes to an existing account.
    ///
    /// # Errors
    /// * `Missing` - No account with this email exists
    /// * `Database` - Storage operation failed
    async fn save(&self, account: Account) -> Result<Account, StoreError>;
}

/// One-way password hashing.
pub trait PasswordVerifier: Send + Sync + 'static {
    fn hash(&self, password: &str) -> Result<String, PasswordError>;

    fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError>;
}
