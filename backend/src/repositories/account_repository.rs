//! Database repository for account management operations.
//!
//! `AccountStore` is the persistence capability the authentication service
//! depends on. `PgAccountRepository` is the PostgreSQL implementation; the
//! table's unique constraints on `username` and `email` are the actual
//! guarantee of account uniqueness.

use crate::database::models::{Account, NewAccount};
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Account not found: {0}")]
    NotFound(String),

    /// A unique constraint (username or email) rejected the write.
    #[error("Duplicate account: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence of accounts.
///
/// Implementations must be safe for concurrent use by many requests.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Inserts a new account and returns its store-assigned id.
    async fn create_account(&self, account: NewAccount) -> StoreResult<i32>;

    async fn get_account_by_id(&self, id: i32) -> StoreResult<Account>;

    async fn get_account_by_username(&self, username: &str) -> StoreResult<Account>;

    async fn delete_account_by_id(&self, id: i32) -> StoreResult<()>;

    /// Removes every account. Intended for administration and test resets.
    async fn delete_accounts(&self) -> StoreResult<()>;
}

const QUERY_CREATE_ACCOUNT: &str = r#"
    INSERT INTO account (username, password, email, creation_date)
    VALUES ($1, $2, $3, $4)
    RETURNING id
"#;

const QUERY_SELECT_ACCOUNT_BY_ID: &str = r#"
    SELECT id, username, password, email, creation_date
    FROM account
    WHERE id = $1
    LIMIT 1
"#;

const QUERY_SELECT_ACCOUNT_BY_USERNAME: &str = r#"
    SELECT id, username, password, email, creation_date
    FROM account
    WHERE username = $1
    LIMIT 1
"#;

const QUERY_DELETE_ACCOUNT_BY_ID: &str = r#"
    DELETE FROM account
    WHERE id = $1
"#;

const QUERY_DELETE_ACCOUNTS: &str = "DELETE FROM account";

/// Repository for account database operations.
#[derive(Clone)]
pub struct PgAccountRepository {
    /// Shared PostgreSQL connection pool
    pool: PgPool,
}

impl PgAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PgAccountRepository {
    async fn create_account(&self, account: NewAccount) -> StoreResult<i32> {
        let id: i32 = sqlx::query_scalar(QUERY_CREATE_ACCOUNT)
            .bind(&account.username)
            .bind(&account.password_hash)
            .bind(&account.email)
            .bind(account.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(map_write_error)?;

        Ok(id)
    }

    async fn get_account_by_id(&self, id: i32) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(QUERY_SELECT_ACCOUNT_BY_ID)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("id {id}")))
    }

    async fn get_account_by_username(&self, username: &str) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(QUERY_SELECT_ACCOUNT_BY_USERNAME)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("username {username}")))
    }

    async fn delete_account_by_id(&self, id: i32) -> StoreResult<()> {
        let result = sqlx::query(QUERY_DELETE_ACCOUNT_BY_ID)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(format!("id {id}")));
        }

        Ok(())
    }

    async fn delete_accounts(&self) -> StoreResult<()> {
        sqlx::query(QUERY_DELETE_ACCOUNTS)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

fn map_write_error(error: sqlx::Error) -> StoreError {
    match &error {
        sqlx::Error::Database(db_error) if db_error.is_unique_violation() => {
            StoreError::Duplicate(db_error.message().to_string())
        }
        _ => StoreError::Database(error),
    }
}
