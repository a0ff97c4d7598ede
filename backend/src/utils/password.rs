//! One-way salted password hashing.
//!
//! `PasswordHasher` is the capability the authentication service uses;
//! `BcryptHasher` is the production implementation.

use crate::config::DEFAULT_HASH_COST;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Password is longer than {max} bytes")]
    TooLong { max: usize },

    /// The candidate does not match, or the stored hash is unusable.
    #[error("Password does not match")]
    Mismatch,
}

pub trait PasswordHasher: Send + Sync {
    /// Derives a salted hash of `plaintext`.
    fn hash(&self, plaintext: &[u8]) -> Result<String, PasswordError>;

    /// Returns `Ok(())` only when `candidate` matches `hash`.
    ///
    /// A malformed hash and a wrong candidate produce the same error.
    fn verify(&self, hash: &str, candidate: &[u8]) -> Result<(), PasswordError>;
}

/// Longest password bcrypt hashes without truncation (72 bytes including
/// the trailing NUL).
pub const MAX_PASSWORD_BYTES: usize = 71;

/// bcrypt with a fixed work factor.
///
/// Passwords past `MAX_PASSWORD_BYTES` are rejected rather than truncated.
#[derive(Debug, Clone)]
pub struct BcryptHasher {
    cost: u32,
}

impl BcryptHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self::new(DEFAULT_HASH_COST)
    }
}

impl PasswordHasher for BcryptHasher {
    fn hash(&self, plaintext: &[u8]) -> Result<String, PasswordError> {
        match bcrypt::non_truncating_hash(plaintext, self.cost) {
            Ok(hash) => Ok(hash),
            Err(bcrypt::BcryptError::Truncation(_)) => Err(PasswordError::TooLong {
                max: MAX_PASSWORD_BYTES,
            }),
            Err(e) => Err(PasswordError::Hash(e.to_string())),
        }
    }

    fn verify(&self, hash: &str, candidate: &[u8]) -> Result<(), PasswordError> {
        match bcrypt::non_truncating_verify(candidate, hash) {
            Ok(true) => Ok(()),
            Ok(false) | Err(_) => Err(PasswordError::Mismatch),
        }
    }
}
