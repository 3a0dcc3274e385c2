use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::ProfileError;

/// Account aggregate entity.
///
/// Identity is the email address. The login-tracking fields
/// (`last_login`, `account_locked`, `lock_time`, `failed_attempts`) are
/// mutated only by the authentication service.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub account_locked: bool,
    pub lock_time: Option<DateTime<Utc>>,
    pub failed_attempts: u32,
}

impl Account {
    /// Build a freshly registered, unlocked account.
    pub fn new(
        email: EmailAddress,
        password_hash: String,
        profile: Profile,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: AccountId::new(),
            email,
            password_hash,
            profile,
            created_at: now,
            last_login: None,
            account_locked: false,
            lock_time: None,
            failed_attempts: 0,
        }
    }

    /// Clear the lock and reset the failure counter.
    pub fn unlock(&mut self) {
        self.account_locked = false;
        self.lock_time = None;
        self.failed_attempts = 0;
    }

    /// Lock the account as of `now`.
    pub fn lock(&mut self, now: DateTime<Utc>) {
        self.account_locked = true;
        self.lock_time = Some(now);
    }

    /// Record a successful login at `now`.
    pub fn record_login(&mut self, now: DateTime<Utc>) {
        self.failed_attempts = 0;
        self.last_login = Some(now);
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("profile", &self.profile)
            .field("created_at", &self.created_at)
            .field("last_login", &self.last_login)
            .field("account_locked", &self.account_locked)
            .field("lock_time", &self.lock_time)
            .field("failed_attempts", &self.failed_attempts)
            .finish()
    }
}

/// Account row identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Arguments
    /// * `email` - Raw email string
    ///
    /// # Returns
    /// Validated EmailAddress value object
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Inert profile fields carried alongside the credential.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl Profile {
    /// Longest name the accounts table stores.
    pub const MAX_NAME_LENGTH: usize = 100;

    /// Build a profile from raw name fields.
    ///
    /// Names are trimmed and blank names are dropped.
    ///
    /// # Errors
    /// * `TooLong` - A name exceeds `MAX_NAME_LENGTH` characters
    pub fn new(
        first_name: Option<String>,
        last_name: Option<String>,
    ) -> Result<Self, ProfileError> {
        Ok(Self {
            first_name: name_field("first_name", first_name)?,
            last_name: name_field("last_name", last_name)?,
        })
    }
}

fn name_field(field: &'static str, value: Option<String>) -> Result<Option<String>, ProfileError> {
    let Some(value) = value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
    else {
        return Ok(None);
    };

    if value.chars().count() > Profile::MAX_NAME_LENGTH {
        return Err(ProfileError::TooLong {
            field,
            max: Profile::MAX_NAME_LENGTH,
        });
    }

    Ok(Some(value))
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: String,
    pub profile: Profile,
}

impl RegisterCommand {
    /// # Arguments
    /// * `email` - Validated email address
    /// * `password` - Plain text password (will be hashed by service)
    /// * `profile` - Optional name fields
    pub fn new(email: EmailAddress, password: String, profile: Profile) -> Self {
        Self {
            email,
            password,
            profile,
        }
    }
}

/// Successful login: the issued token and the account as persisted.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub account: Account,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::new(
            EmailAddress::new("alice@example.com".to_string()).unwrap(),
            "$argon2id$secret_hash".to_string(),
            Profile::default(),
            Utc::now(),
        )
    }

    #[test]
    fn test_new_account_is_unlocked() {
        let account = account();
        assert!(!account.account_locked);
        assert!(account.lock_time.is_none());
        assert_eq!(account.failed_attempts, 0);
        assert!(account.last_login.is_none());
    }

    #[test]
    fn test_lock_then_unlock() {
        let mut account = account();
        account.failed_attempts = 3;
        let now = Utc::now();

        account.lock(now);
        assert!(account.account_locked);
        assert_eq!(account.lock_time, Some(now));

        account.unlock();
        assert!(!account.account_locked);
        assert!(account.lock_time.is_none());
        assert_eq!(account.failed_attempts, 0);
    }

    #[test]
    fn test_debug_hides_password_hash() {
        let rendered = format!("{:?}", account());
        assert!(!rendered.contains("secret_hash"));
        assert!(rendered.contains("alice@example.com"));
    }

    #[test]
    fn test_email_validation() {
        assert!(EmailAddress::new("alice@example.com".to_string()).is_ok());
        assert!(matches!(
            EmailAddress::new("not-an-email".to_string()),
            Err(EmailError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_profile_trims_and_drops_blank_names() {
        let profile = Profile::new(Some("  Alice ".to_string()), Some("   ".to_string())).unwrap();
        assert_eq!(profile.first_name.as_deref(), Some("Alice"));
        assert!(profile.last_name.is_none());
    }

    #[test]
    fn test_profile_name_length_limit() {
        let longest = "a".repeat(Profile::MAX_NAME_LENGTH);
        assert!(Profile::new(Some(longest), None).is_ok());

        let too_long = "é".repeat(Profile::MAX_NAME_LENGTH + 1);
        assert_eq!(
            Profile::new(None, Some(too_long)),
            Err(ProfileError::TooLong {
                field: "last_name",
                max: 100
            })
        );
    }
}
