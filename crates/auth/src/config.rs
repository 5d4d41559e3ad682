//! Authentication configuration

use agentstore_common::config::{Config, DEFAULT_LOGIN_PATH, DEFAULT_TOKEN_KEY};

use crate::types::ExpiryPolicy;

/// Authentication configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    pub token_key: String,
    pub login_path: String,
    pub expiry_policy: ExpiryPolicy,
    pub evict_expired: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            expiry_policy: ExpiryPolicy::default(),
            evict_expired: false,
        }
    }
}

impl From<&Config> for AuthConfig {
    fn from(config: &Config) -> Self {
        Self {
            token_key: config.token_key.clone(),
            login_path: config.login_path.clone(),
            expiry_policy: if config.allow_non_expiring {
                ExpiryPolicy::AllowNonExpiring
            } else {
                ExpiryPolicy::RequireExpiry
            },
            evict_expired: config.evict_expired,
        }
    }
}
