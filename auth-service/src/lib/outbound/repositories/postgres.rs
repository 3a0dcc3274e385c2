use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::StoreError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Profile;
use crate::domain::account::ports::CredentialStore;

const EMAIL_UNIQUE_CONSTRAINT: &str = "accounts_email_key";

const SELECT_ACCOUNT: &str = r#"
    SELECT id, email, password_hash, first_name, last_name, created_at,
           last_login, account_locked, lock_time, failed_attempts
    FROM accounts
    WHERE email = $1
"#;

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

fn account_from_row(row: &PgRow) -> Result<Account, StoreError> {
    let email: String = row.try_get("email").map_err(database_error)?;
    let failed_attempts: i32 = row.try_get("failed_attempts").map_err(database_error)?;

    Ok(Account {
        id: AccountId(row.try_get("id").map_err(database_error)?),
        email: EmailAddress::new(email).map_err(|e| StoreError::Database(e.to_string()))?,
        password_hash: row.try_get("password_hash").map_err(database_error)?,
        profile: Profile {
            first_name: row.try_get("first_name").map_err(database_error)?,
            last_name: row.try_get("last_name").map_err(database_error)?,
        },
        created_at: row.try_get("created_at").map_err(database_error)?,
        last_login: row.try_get("last_login").map_err(database_error)?,
        account_locked: row.try_get("account_locked").map_err(database_error)?,
        lock_time: row.try_get("lock_time").map_err(database_error)?,
        failed_attempts: u32::try_from(failed_attempts).unwrap_or(0),
    })
}

fn counter_column(failed_attempts: u32) -> i32 {
    i32::try_from(failed_attempts).unwrap_or(i32::MAX)
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Account>, StoreError> {
        let row = sqlx::query(SELECT_ACCOUNT)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn exists_by_email(&self, email: &EmailAddress) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = $1)")
            .bind(email.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }

    async fn create(&self, account: Account) -> Result<Account, StoreError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, email, password_hash, first_name, last_name, created_at,
                                  last_login, account_locked, lock_time, failed_attempts)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(&account.profile.first_name)
        .bind(&account.profile.last_name)
        .bind(account.created_at)
        .bind(account.last_login)
        .bind(account.account_locked)
        .bind(account.lock_time)
        .bind(counter_column(account.failed_attempts))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(EMAIL_UNIQUE_CONSTRAINT)
                {
                    return StoreError::Conflict(account.email.to_string());
                }
            }
            database_error(e)
        })?;

        Ok(account)
    }

    async fn save(&self, account: Account) -> Result<Account, StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET password_hash = $2, first_name = $3, last_name = $4, last_login = $5,
                account_locked = $6, lock_time = $7, failed_attempts = $8
            WHERE email = $1
            "#,
        )
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(&account.profile.first_name)
        .bind(&account.profile.last_name)
        .bind(account.last_login)
        .bind(account.account_locked)
        .bind(account.lock_time)
        .bind(counter_column(account.failed_attempts))
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(account.email.to_string()));
        }

        Ok(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_column_clamps() {
        assert_eq!(counter_column(3), 3);
        assert_eq!(counter_column(u32::MAX), i32::MAX);
    }
}
