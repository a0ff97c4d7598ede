//! Defines the HTTP routes specifically for authentication.
//!
//! These routes handle account registration and login. They expect an
//! `Extension<AuthService>` layer on the router they are nested into.

use crate::auth::handlers::*;
use axum::{Router, routing::post};

/// Creates the authentication router with all auth-related routes
pub fn auth_router() -> Router {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
}
