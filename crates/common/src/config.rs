//! Configuration management following 12-factor app principles
//!
//! All configuration is loaded from environment variables to ensure
//! clean separation between code and config.

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Storage slot used when `AGENT_STORE_TOKEN_KEY` is not set
pub const DEFAULT_TOKEN_KEY: &str = "auth_token";

/// Redirect target used when `AGENT_STORE_LOGIN_PATH` is not set
pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// File backing the client-local token store. `None` means no persistent
    /// storage is available in this context.
    pub token_file: Option<PathBuf>,

    /// Key of the single token slot
    pub token_key: String,

    /// Where unauthenticated callers are sent
    pub login_path: String,

    /// Treat tokens without an `exp` claim as non-expiring
    pub allow_non_expiring: bool,

    /// Remove expired or malformed tokens when the auth gate sees them
    pub evict_expired: bool,

    /// Runtime configuration
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            token_file: None,
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            allow_non_expiring: false,
            evict_expired: false,
            rust_log: "agentstore=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            token_file: lookup("AGENT_STORE_TOKEN_FILE")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            token_key: lookup("AGENT_STORE_TOKEN_KEY")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.token_key),
            login_path: lookup("AGENT_STORE_LOGIN_PATH").unwrap_or(defaults.login_path),
            allow_non_expiring: parse_flag(
                "AGENT_STORE_ALLOW_NON_EXPIRING",
                lookup("AGENT_STORE_ALLOW_NON_EXPIRING"),
            )?,
            evict_expired: parse_flag(
                "AGENT_STORE_EVICT_EXPIRED",
                lookup("AGENT_STORE_EVICT_EXPIRED"),
            )?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
        };

        tracing::debug!(
            token_key = %config.token_key,
            persistent = config.token_file.is_some(),
            "Configuration loaded"
        );

        Ok(config)
    }
}

fn parse_flag(name: &str, value: Option<String>) -> Result<bool> {
    let Some(value) = value else {
        return Ok(false);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::Config(format!(
            "{} must be a boolean, got '{}'",
            name, other
        ))),
    }
}
