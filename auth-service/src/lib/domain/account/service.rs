use std::sync::Arc;

use async_trait::async_trait;
use auth::LockoutDecision;
use auth::LockoutPolicy;
use auth::PasswordStrength;
use auth::SessionRegistry;
use auth::TokenCodec;
use auth::TokenError;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;

use crate::domain::account::errors::AuthError;
use crate::domain::account::errors::StoreError;
use crate::domain::account::gate::LoginGate;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::LoginOutcome;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AuthServicePort;
use crate::domain::account::ports::CredentialStore;
use crate::domain::account::ports::PasswordVerifier;

/// Domain service implementation for authentication.
///
/// Owns the lockout state machine: it is the only writer of an account's
/// login-tracking fields, and the only caller of the session registry.
pub struct AuthService<CS, PV>
where
    CS: CredentialStore,
    PV: PasswordVerifier,
{
    store: Arc<CS>,
    passwords: Arc<PV>,
    tokens: Arc<TokenCodec>,
    sessions: Arc<SessionRegistry>,
    policy: LockoutPolicy,
    strength: Option<PasswordStrength>,
    gate: LoginGate,
}

impl<CS, PV> AuthService<CS, PV>
where
    CS: CredentialStore,
    PV: PasswordVerifier,
{
    /// Create a new authentication service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Account persistence implementation
    /// * `passwords` - Password hashing implementation
    /// * `tokens` - Token codec holding the process signing key
    /// * `sessions` - Active session table
    /// * `policy` - Lockout thresholds
    pub fn new(
        store: Arc<CS>,
        passwords: Arc<PV>,
        tokens: Arc<TokenCodec>,
        sessions: Arc<SessionRegistry>,
        policy: LockoutPolicy,
    ) -> Self {
        Self {
            store,
            passwords,
            tokens,
            sessions,
            policy,
            strength: None,
            gate: LoginGate::default(),
        }
    }

    /// Enforce password strength rules at registration.
    pub fn with_password_strength(mut self, strength: PasswordStrength) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn policy(&self) -> &LockoutPolicy {
        &self.policy
    }

    /// Count a failed attempt, locking at the threshold, and build the rejection.
    async fn reject_attempt(&self, mut account: Account, now: DateTime<Utc>) -> AuthError {
        let outcome = self.policy.record_failure(account.failed_attempts);
        account.failed_attempts = outcome.failed_attempts;

        if outcome.should_lock {
            account.lock(now);
            tracing::warn!(
                email = %account.email,
                failed_attempts = outcome.failed_attempts,
                "Account locked after repeated login failures"
            );
        } else {
            tracing::info!(
                email = %account.email,
                failed_attempts = outcome.failed_attempts,
                "Login failed: invalid credentials"
            );
        }

        if let Err(e) = self.store.save(account).await {
            return AuthError::Store(e);
        }

        AuthError::InvalidCredentials {
            remaining_attempts: self.policy.remaining_attempts(outcome.failed_attempts),
        }
    }
}

/// Whole minutes left on a lock, rounded up. Never below one while locked.
fn minutes_remaining(retry_after: Duration) -> i64 {
    ((retry_after.num_milliseconds() + 59_999) / 60_000).max(1)
}

#[async_trait]
impl<CS, PV> AuthServicePort for AuthService<CS, PV>
where
    CS: CredentialStore,
    PV: PasswordVerifier,
{
    async fn register(&self, command: RegisterCommand) -> Result<Account, AuthError> {
        if let Some(strength) = &self.strength {
            strength.check(&command.password)?;
        }

        // Concurrent duplicates pass this check; the store's uniqueness constraint decides those.
        if self.store.exists_by_email(&command.email).await? {
            tracing::info!(email = %command.email, "Registration rejected: email exists");
            return Err(AuthError::AlreadyRegistered(command.email.to_string()));
        }

        let password_hash = self.passwords.hash(&command.password)?;
        let email = command.email.clone();
        let account = Account::new(command.email, password_hash, command.profile, Utc::now());

        let created = self.store.create(account).await.map_err(|e| match e {
            StoreError::Conflict(_) => AuthError::AlreadyRegistered(email.to_string()),
            other => AuthError::Store(other),
        })?;

        tracing::info!(
            account_id = %created.id,
            email = %created.email,
            "Account registered"
        );

        Ok(created)
    }

    async fn login(
        &self,
        email: &EmailAddress,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginOutcome, AuthError> {
        let _guard = self.gate.acquire(email.as_str()).await;

        let mut account = self
            .store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))?;

        match self.policy.evaluate(
            account.account_locked,
            account.lock_time,
            account.failed_attempts,
            now,
        ) {
            LockoutDecision::StillLocked => {
                let retry_after = account
                    .lock_time
                    .map(|lock_time| self.policy.retry_after(lock_time, now))
                    .unwrap_or_else(Duration::zero);
                tracing::warn!(email = %email, "Login rejected: account locked");
                return Err(AuthError::AccountLocked {
                    retry_after_minutes: minutes_remaining(retry_after),
                });
            }
            LockoutDecision::AutoUnlock => {
                account.unlock();
                account = self.store.save(account).await?;
                tracing::info!(email = %email, "Account lock elapsed");
            }
            LockoutDecision::Allow => {}
        }

        if !self.passwords.verify(password, &account.password_hash)? {
            return Err(self.reject_attempt(account, now).await);
        }

        account.record_login(now);
        let account = self.store.save(account).await?;

        let token = self.tokens.issue(email.as_str(), now)?;
        self.sessions.put(email.as_str(), &token);

        tracing::info!(account_id = %account.id, email = %email, "Login succeeded");

        Ok(LoginOutcome { token, account })
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.tokens.decode(token)?;
        self.sessions.remove(claims.identity());

        tracing::info!(email = %claims.identity(), "Session closed");

        Ok(())
    }

    async fn authorize(&self, token: &str) -> Result<EmailAddress, AuthError> {
        let claims = self.tokens.decode(token)?;

        if !self.sessions.is_valid(claims.identity(), token) {
            return Err(AuthError::SessionRevoked);
        }

        EmailAddress::new(claims.sub)
            .map_err(|e| AuthError::InvalidToken(TokenError::Malformed(e.to_string())))
    }

    async fn profile(&self, email: &EmailAddress) -> Result<Account, AuthError> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::UserNotFound(email.to_string()))
    }
}
