//! Central module for application-wide configuration settings.
//!
//! This module handles loading and managing configuration parameters such as
//! the listen address, database connection settings, the JWT signing key and
//! the password hashing work factor. The configuration is assembled once at
//! startup and handed to the constructors that need it.

use anyhow::{Context, Result, ensure};
use std::env;
use std::fmt;
use std::str::FromStr;

const ENV_PREFIX: &str = "FITTER_LOGIN_SERVICE_";

/// Default lifetime of an issued session token (5 hours).
pub const DEFAULT_TOKEN_EXPIRES_IN_SECONDS: u64 = 5 * 60 * 60;

/// Longest accepted session token lifetime (one year).
pub const MAX_TOKEN_EXPIRES_IN_SECONDS: u64 = 365 * 24 * 60 * 60;

/// Default bcrypt work factor.
pub const DEFAULT_HASH_COST: u32 = 8;

/// Work factors bcrypt accepts.
pub const HASH_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub hash_cost: u32,
}

#[derive(Clone)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
    pub max_connections: u32,
    pub acquire_timeout_seconds: u64,
}

#[derive(Clone)]
pub struct JwtConfig {
    pub sign_key: String,
    pub expires_in_seconds: u64,
}

impl Config {
    /// Loads configuration from a `.env` file (if any) and the process environment.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Keys are looked up with the `FITTER_LOGIN_SERVICE_` prefix applied.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_or(&var, "PORT", 8080u16)?;

        let database = DatabaseConfig {
            host: var("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_or(&var, "DB_PORT", 5432u16)?,
            username: var("DB_USER").context("FITTER_LOGIN_SERVICE_DB_USER not set")?,
            password: var("DB_PASSWORD").unwrap_or_default(),
            name: var("DB_NAME").context("FITTER_LOGIN_SERVICE_DB_NAME not set")?,
            max_connections: parse_or(&var, "DB_MAX_CONNECTIONS", 5u32)?,
            acquire_timeout_seconds: parse_or(&var, "DB_ACQUIRE_TIMEOUT_SECONDS", 3u64)?,
        };

        let jwt = JwtConfig {
            sign_key: var("JWT_SIGNKEY").unwrap_or_default(),
            expires_in_seconds: parse_or(
                &var,
                "JWT_EXPIRES_IN_SECONDS",
                DEFAULT_TOKEN_EXPIRES_IN_SECONDS,
            )?,
        };
        ensure!(
            (1..=MAX_TOKEN_EXPIRES_IN_SECONDS).contains(&jwt.expires_in_seconds),
            "{ENV_PREFIX}JWT_EXPIRES_IN_SECONDS must be between 1 and {MAX_TOKEN_EXPIRES_IN_SECONDS}"
        );

        let hash_cost = parse_or(&var, "HASH_COST", DEFAULT_HASH_COST)?;
        ensure!(
            HASH_COST_RANGE.contains(&hash_cost),
            "{ENV_PREFIX}HASH_COST must be between {} and {}",
            HASH_COST_RANGE.start(),
            HASH_COST_RANGE.end()
        );

        Ok(Config {
            host,
            port,
            database,
            jwt,
            hash_cost,
        })
    }

    /// Address the HTTP server binds to.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T, V>(var: &V, name: &str, default: T) -> Result<T>
where
    T: FromStr,
    <T as FromStr>::Err: std::error::Error + Send + Sync + 'static,
    V: Fn(&str) -> Option<String>,
{
    match var(name) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{ENV_PREFIX}{name} must be a valid number")),
        None => Ok(default),
    }
}

// Credentials stay out of logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_seconds", &self.acquire_timeout_seconds)
            .finish()
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("sign_key", &"<redacted>")
            .field("expires_in_seconds", &self.expires_in_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (format!("{ENV_PREFIX}{k}"), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_applied() {
        let config =
            Config::from_lookup(lookup_from(&[("DB_USER", "fitter"), ("DB_NAME", "accounts")]))
                .unwrap();

        assert_eq!(config.addr(), "0.0.0.0:8080");
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.password, "");
        assert_eq!(config.jwt.expires_in_seconds, 5 * 60 * 60);
        assert_eq!(config.hash_cost, 8);
        assert!(config.jwt.sign_key.is_empty());
    }

    #[test]
    fn test_explicit_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "9000"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "fitter"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "accounts"),
            ("JWT_SIGNKEY", "supersecretsignkey"),
            ("JWT_EXPIRES_IN_SECONDS", "60"),
            ("HASH_COST", "10"),
        ]))
        .unwrap();

        assert_eq!(config.addr(), "127.0.0.1:9000");
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.jwt.sign_key, "supersecretsignkey");
        assert_eq!(config.jwt.expires_in_seconds, 60);
        assert_eq!(config.hash_cost, 10);
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("PORT", "-1"),
            ("DB_USER", "fitter"),
            ("DB_NAME", "accounts"),
        ]));
        assert!(result.is_err());

        let result = Config::from_lookup(lookup_from(&[
            ("DB_PORT", "not-a-port"),
            ("DB_USER", "fitter"),
            ("DB_NAME", "accounts"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_token_lifetime_range() {
        for lifetime in ["0", "31536001", "18446744073709551615", "10000000000000000"] {
            let result = Config::from_lookup(lookup_from(&[
                ("DB_USER", "fitter"),
                ("DB_NAME", "accounts"),
                ("JWT_EXPIRES_IN_SECONDS", lifetime),
            ]));
            assert!(result.is_err(), "lifetime {lifetime} accepted");
        }

        let config = Config::from_lookup(lookup_from(&[
            ("DB_USER", "fitter"),
            ("DB_NAME", "accounts"),
            ("JWT_EXPIRES_IN_SECONDS", "31536000"),
        ]))
        .unwrap();
        assert_eq!(config.jwt.expires_in_seconds, MAX_TOKEN_EXPIRES_IN_SECONDS);
    }

    #[test]
    fn test_hash_cost_range() {
        for cost in ["3", "32", "0"] {
            let result = Config::from_lookup(lookup_from(&[
                ("DB_USER", "fitter"),
                ("DB_NAME", "accounts"),
                ("HASH_COST", cost),
            ]));
            let error = result.unwrap_err();
            assert!(error.to_string().contains("HASH_COST"));
        }

        for cost in ["4", "31"] {
            let config = Config::from_lookup(lookup_from(&[
                ("DB_USER", "fitter"),
                ("DB_NAME", "accounts"),
                ("HASH_COST", cost),
            ]))
            .unwrap();
            assert_eq!(config.hash_cost.to_string(), cost);
        }
    }

    #[test]
    fn test_missing_database_name() {
        let result = Config::from_lookup(lookup_from(&[("DB_USER", "fitter")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = Config::from_lookup(lookup_from(&[
            ("DB_USER", "fitter"),
            ("DB_PASSWORD", "hunter2"),
            ("DB_NAME", "accounts"),
            ("JWT_SIGNKEY", "supersecretsignkey"),
        ]))
        .unwrap();

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("hunter2"));
        assert!(!rendered.contains("supersecretsignkey"));
    }
}
