use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::account::errors::StoreError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::CredentialStore;

/// Process-local credential store keyed by email.
///
/// Used when no database is configured and by the test suites. Email
/// uniqueness is enforced on `create` under the write lock.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    accounts: RwLock<HashMap<String, Account>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.read().await.len()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(email.as_str()).cloned())
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        Ok(self.accounts.read().await.contains_key(email.as_str()))
    }

    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        if accounts.contains_key(account.email.as_str()) {
            return Err(StoreError::Conflict(account.email.to_string()));
        }

        accounts.insert(account.email.as_str().to_string(), account.clone());
        tracing::debug!(account_id = %account.id, "Account stored in memory");

        Ok(account)
    }

    async fn save(&self, account: Account) -> Result<Account, StoreError> {
        let mut accounts = self.accounts.write().await;

        match accounts.get_mut(account.email.as_str()) {
            Some(stored) => {
                *stored = account.clone();
                Ok(account)
            }
            None => Err(StoreError::Missing(account.email.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::account::models::Profile;

    fn account(email: &str) -> Account {
        Account::new(
            EmailAddress::new(email.to_string()).unwrap(),
            "$argon2id$hash".to_string(),
            Profile::default(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = InMemoryCredentialStore::new();
        let created = store.create(account("alice@example.com")).await.unwrap();

        let found = store
            .find_by_email(&created.email)
            .await
            .unwrap()
            .expect("Account should exist");
        assert_eq!(found, created);
        assert!(store.exists_by_email(&created.email).await.unwrap());
    }

    #[tokio::test]
    async fn test_create_duplicate_conflicts() {
        let store = InMemoryCredentialStore::new();
        store.create(account("alice@example.com")).await.unwrap();

        let result = store.create(account("alice@example.com")).await;
        assert!(matches!(result, Err(StoreError::Conflict(_))));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_save_overwrites_tracking_fields() {
        let store = InMemoryCredentialStore::new();
        let mut stored = store.create(account("alice@example.com")).await.unwrap();

        stored.failed_attempts = 2;
        store.save(stored.clone()).await.unwrap();

        let found = store.find_by_email(&stored.email).await.unwrap().unwrap();
        assert_eq!(found.failed_attempts, 2);
    }

    #[tokio::test]
    async fn test_save_unknown_account_fails() {
        let store = InMemoryCredentialStore::new();
        let result = store.save(account("ghost@example.com")).await;
        assert!(matches!(result, Err(StoreError::Missing(_))));
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let store = InMemoryCredentialStore::new();
        let email = EmailAddress::new("nobody@example.com".to_string()).unwrap();

        assert!(store.find_by_email(&email).await.unwrap().is_none());
        assert!(!store.exists_by_email(&email).await.unwrap());
    }
}
