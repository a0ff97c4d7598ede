//! Main entry point for the login service.
//!
//! This file initializes logging, loads the configuration, sets up the
//! database connection pool and the authentication service, and serves the
//! Axum router until a shutdown signal arrives.

mod api;
mod auth;
mod config;
mod database;
mod errors;
mod repositories;
mod utils;

use crate::api::common::ApiResponse;
use crate::auth::service::AuthService;
use crate::repositories::account_repository::PgAccountRepository;
use crate::utils::jwt::JwtUtils;
use crate::utils::password::BcryptHasher;
use anyhow::Context;
use axum::{Extension, Router, response::Json, routing::get};
use config::Config;
use database::Database;
use serde_json::json;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::fmt::init;

#[tokio::main]
async fn main() -> ExitCode {
    init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Login service terminated: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    let jwt_utils = JwtUtils::new(&config.jwt);
    if !jwt_utils.has_key() {
        warn!("FITTER_LOGIN_SERVICE_JWT_SIGNKEY is empty; logins will fail until it is set");
    }

    let db = Database::new(&config.database).await?;
    let store = Arc::new(PgAccountRepository::new(db.pool().clone()));
    let hasher = Arc::new(BcryptHasher::new(config.hash_cost));
    info!(cost = hasher.cost(), "Password hashing configured");
    let auth_service = AuthService::new(store, hasher, jwt_utils);

    let bind_address = config.addr();
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("could not bind {bind_address}"))?;

    info!(address = %bind_address, "Starting login service");
    axum::serve(listener, app(auth_service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    db.close().await;
    info!("Login service shutdown complete");
    Ok(())
}

/// Builds the application router around a ready `AuthService`.
pub fn app(auth_service: AuthService) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .nest("/api/auth", auth::routes::auth_router())
        .layer(Extension(auth_service))
}

async fn root_handler() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::success(
        json!({
            "service": "Fitter Login Service",
            "version": env!("CARGO_PKG_VERSION")
        }),
        "Welcome to the login service",
    ))
}

/// Resolves when Ctrl+C or SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
