//! Auth gate deciding whether an authenticated view may be shown

use chrono::{DateTime, Utc};

use crate::backend::TokenStorage;
use crate::claims::TokenClaims;
use crate::config::AuthConfig;
use crate::jwt::decode_payload;
use crate::store::TokenStore;
use crate::types::GateReason;

/// Result of gating a view on the stored token
#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    Authenticated(TokenClaims),
    RedirectToLogin {
        reason: GateReason,
        login_path: String,
    },
}

impl GateDecision {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, GateDecision::Authenticated(_))
    }

    pub fn claims(&self) -> Option<&TokenClaims> {
        match self {
            GateDecision::Authenticated(claims) => Some(claims),
            GateDecision::RedirectToLogin { .. } => None,
        }
    }
}

/// Reads the token store and decides between showing a view and redirecting
#[derive(Debug, Clone)]
pub struct AuthGate<S> {
    store: TokenStore<S>,
    config: AuthConfig,
}

impl<S: TokenStorage> AuthGate<S> {
    /// Create a gate over `storage`, using the slot named in `config`
    pub fn new(storage: S, config: AuthConfig) -> Self {
        let store = TokenStore::with_key(storage, config.token_key.clone());
        Self { store, config }
    }

    pub fn store(&self) -> &TokenStore<S> {
        &self.store
    }

    /// Gate on the stored token against the wall clock
    #[mutants::skip] // Delegates to check_at() with the current time
    pub fn check(&self) -> GateDecision {
        self.check_at(Utc::now())
    }

    /// Gate on the stored token as of `now`
    pub fn check_at(&self, now: DateTime<Utc>) -> GateDecision {
        let Some(token) = self.store.get_token() else {
            return self.redirect(GateReason::NoToken);
        };

        let claims = match decode_payload(&token) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Stored token does not decode");
                return self.reject(GateReason::Malformed);
            }
        };

        match claims.expiry(now, self.config.expiry_policy) {
            Ok(expiry) if expiry.is_expired() => self.reject(GateReason::Expired),
            Ok(_) => {
                tracing::debug!(sub = ?claims.subject(), "Stored token accepted");
                GateDecision::Authenticated(claims)
            }
            Err(e) => {
                tracing::debug!(error = %e, "Stored token has no usable expiry");
                self.reject(GateReason::Malformed)
            }
        }
    }

    /// Redirect, evicting the stored token first when configured to
    fn reject(&self, reason: GateReason) -> GateDecision {
        if self.config.evict_expired {
            tracing::info!(%reason, key = %self.store.key(), "Evicting stored token");
            self.store.remove_token();
        }
        self.redirect(reason)
    }

    fn redirect(&self, reason: GateReason) -> GateDecision {
        tracing::debug!(%reason, login_path = %self.config.login_path, "Redirecting to login");
        GateDecision::RedirectToLogin {
            reason,
            login_path: self.config.login_path.clone(),
        }
    }
}
