//! JWT token utilities for session token issuance.
//!
//! Tokens are self-contained HS256-signed claims carrying the account id,
//! username and an expiry. Nothing server-side backs them; a token stays
//! valid until its encoded expiry.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{DEFAULT_TOKEN_EXPIRES_IN_SECONDS, JwtConfig};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Signing key is empty")]
    MissingKey,

    #[error("Token lifetime of {0} seconds is out of range")]
    Lifetime(u64),

    #[error("Token encoding failed: {0}")]
    Encoding(#[from] jsonwebtoken::errors::Error),
}

/// JWT claims embedded in a session token
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Account ID
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub username: String,
    /// Token expiration timestamp
    pub exp: usize,
    /// Token issued at timestamp
    pub iat: usize,
}

/// Signs a claims set for `account_id`/`username` with `sign_key`.
///
/// The token expires `expires_in_seconds` after issuance.
pub fn issue_token(
    account_id: i32,
    username: &str,
    sign_key: &[u8],
    expires_in_seconds: u64,
) -> Result<String, TokenError> {
    if sign_key.is_empty() {
        return Err(TokenError::MissingKey);
    }

    let now = Utc::now();
    let exp = i64::try_from(expires_in_seconds)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .and_then(|lifetime| now.checked_add_signed(lifetime))
        .ok_or(TokenError::Lifetime(expires_in_seconds))?;

    let claims = Claims {
        user_id: account_id,
        username: username.to_string(),
        exp: exp.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(sign_key),
    )?;
    Ok(token)
}

/// JWT token utility bound to the service's configured key and lifetime.
#[derive(Clone)]
pub struct JwtUtils {
    sign_key: Vec<u8>,
    expires_in_seconds: u64,
}

impl JwtUtils {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            sign_key: config.sign_key.as_bytes().to_vec(),
            expires_in_seconds: config.expires_in_seconds,
        }
    }

    /// Uses the default 5 hour lifetime.
    pub fn with_key(sign_key: impl Into<Vec<u8>>) -> Self {
        Self {
            sign_key: sign_key.into(),
            expires_in_seconds: DEFAULT_TOKEN_EXPIRES_IN_SECONDS,
        }
    }

    pub fn has_key(&self) -> bool {
        !self.sign_key.is_empty()
    }

    /// Generate a new session token for an authenticated account
    pub fn generate_token(&self, account_id: i32, username: &str) -> Result<String, TokenError> {
        issue_token(account_id, username, &self.sign_key, self.expires_in_seconds)
    }
}
