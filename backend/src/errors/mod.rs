//! Global application error types.
//!
//! `ServiceError` is the outcome taxonomy of the authentication protocol.
//! The HTTP boundary maps each variant to a status code in
//! `api::common::service_error_to_http`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request body could not be decoded.
    #[error("Malformed request: {message}")]
    MalformedRequest { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("{entity} already exists: {identifier}")]
    AlreadyExists { entity: String, identifier: String },

    /// Unknown username or wrong password. The two cases are never told apart.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password hashing failed: {message}")]
    Hashing { message: String },

    #[error("Persistence error: {source}")]
    Persistence {
        #[source]
        source: anyhow::Error,
    },

    #[error("Token error: {message}")]
    Token { message: String },
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    // Helper constructors for common patterns

    pub fn malformed_request(message: impl Into<String>) -> Self {
        Self::MalformedRequest {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn already_exists(entity: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity: entity.into(),
            identifier: identifier.into(),
        }
    }

    pub fn hashing(message: impl Into<String>) -> Self {
        Self::Hashing {
            message: message.into(),
        }
    }

    pub fn persistence(source: impl Into<anyhow::Error>) -> Self {
        Self::Persistence {
            source: source.into(),
        }
    }

    pub fn token(message: impl Into<String>) -> Self {
        Self::Token {
            message: message.into(),
        }
    }
}
