//! Rust structs that represent database table mappings.
//!
//! These models define the structure of account data as it is stored in and
//! retrieved from the `account` table.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A stored identity.
///
/// `id` is assigned by the store on creation. `username` and `email` are
/// unique across all accounts.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: i32,
    pub username: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub email: String,
    #[sqlx(rename = "creation_date")]
    pub created_at: DateTime<Utc>,
}

/// Data required to insert a new account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}
