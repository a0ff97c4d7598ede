//! Handler functions for authentication-related API endpoints.
//!
//! These functions decode incoming JSON bodies, hand them to
//! `auth::service::AuthService`, and map the outcome to the response envelope.
//! A body that cannot be decoded is rejected here with 400 and never reaches
//! the service.

use crate::api::common::{ApiError, ApiResponse, service_error_to_http};
use crate::auth::models::*;
use crate::auth::service::AuthService;
use crate::errors::ServiceError;
use axum::{
    extract::{Extension, Json, rejection::JsonRejection},
    response::Json as ResponseJson,
};
use tracing::debug;

/// Handle account registration request
#[axum::debug_handler]
pub async fn register(
    Extension(auth_service): Extension<AuthService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<RegisterResponse>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected register body");
        service_error_to_http(
            ServiceError::malformed_request("Invalid request body."),
            "Could not register user.",
        )
    })?;

    match auth_service.register(request).await {
        Ok(response) => Ok(ResponseJson(ApiResponse::success(
            response,
            "User registered successfully",
        ))),
        Err(error) => Err(service_error_to_http(error, "Could not register user.")),
    }
}

/// Handle user login request
#[axum::debug_handler]
pub async fn login(
    Extension(auth_service): Extension<AuthService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ResponseJson<ApiResponse<LoginResponse>>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        debug!(error = %rejection, "Rejected login body");
        service_error_to_http(
            ServiceError::malformed_request("Wrong request body format."),
            "Could not log in user.",
        )
    })?;

    match auth_service.login(request).await {
        Ok(response) => Ok(ResponseJson(ApiResponse::success(
            response,
            "User login successful.",
        ))),
        Err(error) => Err(service_error_to_http(error, "Could not log in user.")),
    }
}
