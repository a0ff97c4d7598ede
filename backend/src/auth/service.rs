//! Core business logic for the authentication system.
//!
//! Every call is independent; the service holds only its injected
//! collaborators, all of which are shared safely across requests.

use crate::auth::models::*;
use crate::database::models::NewAccount;
use crate::errors::{ServiceError, ServiceResult};
use crate::repositories::account_repository::{AccountStore, StoreError};
use crate::utils::jwt::JwtUtils;
use crate::utils::password::{PasswordError, PasswordHasher};
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info, warn};
use validator::{Validate, ValidationErrors};

/// Authentication service for handling registration and login
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn AccountStore>,
    hasher: Arc<dyn PasswordHasher>,
    jwt_utils: JwtUtils,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn AccountStore>,
        hasher: Arc<dyn PasswordHasher>,
        jwt_utils: JwtUtils,
    ) -> Self {
        AuthService {
            store,
            hasher,
            jwt_utils,
        }
    }

    /// Register a new account and return its id.
    ///
    /// The username lookup only short-circuits the common case; the store's
    /// unique constraints decide, so a duplicate on insert is reported the
    /// same way.
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<RegisterResponse> {
        validate(&request)?;

        match self.store.get_account_by_username(&request.username).await {
            Ok(_) => {
                info!(username = %request.username, "Registration rejected: username taken");
                return Err(ServiceError::already_exists("User", &request.username));
            }
            Err(StoreError::NotFound(_)) => {}
            Err(e) => {
                error!(error = %e, "Account lookup failed during registration");
                return Err(ServiceError::persistence(e));
            }
        }

        let password_hash = self
            .hasher
            .hash(request.password.as_bytes())
            .map_err(|e| match e {
                PasswordError::TooLong { max } => {
                    ServiceError::validation(format!("password: Must be at most {max} bytes"))
                }
                e => {
                    error!(error = %e, "Password hashing failed");
                    ServiceError::hashing(e.to_string())
                }
            })?;

        let new_account = NewAccount {
            username: request.username,
            password_hash,
            email: request.email,
            created_at: Utc::now(),
        };

        match self.store.create_account(new_account.clone()).await {
            Ok(user_id) => {
                info!(user_id, username = %new_account.username, "Account registered");
                Ok(RegisterResponse { user_id })
            }
            Err(StoreError::Duplicate(detail)) => {
                info!(username = %new_account.username, %detail, "Registration rejected by unique constraint");
                Err(ServiceError::already_exists("User", &new_account.username))
            }
            Err(e) => {
                error!(error = %e, "Account insert failed");
                Err(ServiceError::persistence(e))
            }
        }
    }

    /// Verify credentials and issue a signed session token.
    ///
    /// Credentials are not validated up front; an empty username or password
    /// simply fails to match and is reported as invalid credentials.
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<LoginResponse> {
        let account = match self.store.get_account_by_username(&request.username).await {
            Ok(account) => account,
            Err(StoreError::NotFound(_)) => {
                warn!(username = %request.username, "Login failed: unknown username");
                return Err(ServiceError::InvalidCredentials);
            }
            Err(e) => {
                error!(error = %e, "Account lookup failed during login");
                return Err(ServiceError::persistence(e));
            }
        };

        if self
            .hasher
            .verify(&account.password_hash, request.password.as_bytes())
            .is_err()
        {
            warn!(username = %request.username, "Login failed: wrong password");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self
            .jwt_utils
            .generate_token(account.id, &account.username)
            .map_err(|e| {
                error!(error = %e, user_id = account.id, "Token issuance failed");
                ServiceError::token(e.to_string())
            })?;

        info!(user_id = account.id, username = %account.username, "Login successful");
        Ok(LoginResponse { token })
    }
}

fn validate<T: Validate>(request: &T) -> ServiceResult<()> {
    request
        .validate()
        .map_err(|errors| ServiceError::validation(format_validation_errors(&errors)))
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                format!(
                    "{}: {}",
                    field,
                    error.message.as_ref().unwrap_or(&"Invalid value".into())
                )
            })
        })
        .collect();
    messages.sort();
    messages.join(", ")
}
