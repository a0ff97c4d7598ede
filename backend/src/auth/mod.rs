//! Authentication module for account registration and login.
//!
//! This module provides the public interface for authentication-related
//! functionality: request models, the `AuthService` protocol core, its HTTP
//! handlers and routes.

pub mod handlers;
pub mod models;
pub mod routes;
pub mod service;
