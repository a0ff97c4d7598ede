//! Response envelope and error mapping for API responses.
//!
//! Every response body carries the numeric HTTP `status` and a human-readable
//! `message`. Successful responses flatten their payload (`userId`, `token`)
//! next to those two fields; error responses carry nothing else.
//!
//! # Error Handling Flow
//! 1. Service layer returns a `ServiceError`
//! 2. `service_error_to_http` converts it to a status code and envelope
//! 3. Internal failures, already logged by the service, are reported with a
//!    generic message

use crate::errors::ServiceError;
use axum::{http::StatusCode, response::Json as ResponseJson};
use serde::{Deserialize, Serialize};

/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: String,
    #[serde(flatten)]
    pub data: T,
}

/// Body of responses that carry no payload
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiMessage {
    pub status: u16,
    pub message: String,
}

pub type ApiError = (StatusCode, ResponseJson<ApiMessage>);

impl<T> ApiResponse<T> {
    /// Create a successful (200) response
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: message.into(),
            data,
        }
    }
}

impl ApiMessage {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

/// Builds an error response whose body mirrors the status code.
pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, ResponseJson(ApiMessage::new(status, message)))
}

/// Converts ServiceError to appropriate HTTP response with standard format.
///
/// `internal_message` is what callers see for server-side failures.
pub fn service_error_to_http(error: ServiceError, internal_message: &str) -> ApiError {
    match error {
        ServiceError::MalformedRequest { message } | ServiceError::Validation { message } => {
            api_error(StatusCode::BAD_REQUEST, message)
        }
        ServiceError::AlreadyExists { .. } => {
            api_error(StatusCode::BAD_REQUEST, "User already exists.")
        }
        ServiceError::InvalidCredentials => {
            api_error(StatusCode::UNAUTHORIZED, "Wrong user credentials.")
        }
        ServiceError::Hashing { .. }
        | ServiceError::Persistence { .. }
        | ServiceError::Token { .. } => {
            api_error(StatusCode::INTERNAL_SERVER_ERROR, internal_message)
        }
    }
}
