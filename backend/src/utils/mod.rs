//! Shared helpers for credential handling.

pub mod jwt;
pub mod password;
