//! Decoded token claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ExpiryError;
use crate::types::{Expiry, ExpiryPolicy};

/// Claims payload decoded from the middle segment of a bearer token.
///
/// Holds every claim as-is; only `exp` takes part in expiry decisions.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenClaims(Map<String, Value>);

impl TokenClaims {
    pub fn new(claims: Map<String, Value>) -> Self {
        Self(claims)
    }

    /// Look up a raw claim
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Subject (user ID), when present as a string
    pub fn subject(&self) -> Option<&str> {
        self.0.get("sub").and_then(Value::as_str)
    }

    /// Issued at, in seconds since the epoch
    pub fn issued_at(&self) -> Option<f64> {
        self.0.get("iat").and_then(Value::as_f64)
    }

    /// Expires at, in seconds since the epoch
    pub fn expiration(&self) -> Result<f64, ExpiryError> {
        match self.0.get("exp") {
            None => Err(ExpiryError::MissingExpiry),
            Some(value) => value.as_f64().ok_or(ExpiryError::InvalidExpiry),
        }
    }

    /// Expiry as a timestamp, when `exp` is numeric and representable
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.expiration().ok()?;
        let secs = exp.floor();
        let nanos = ((exp - secs) * 1_000_000_000.0) as u32;
        DateTime::from_timestamp(secs as i64, nanos)
    }

    /// Compare `exp` against `now`. A token is expired only when `exp` is
    /// strictly before `now`.
    pub fn expiry(&self, now: DateTime<Utc>, policy: ExpiryPolicy) -> Result<Expiry, ExpiryError> {
        let exp = match self.expiration() {
            Ok(exp) => exp,
            Err(ExpiryError::MissingExpiry) if policy == ExpiryPolicy::AllowNonExpiring => {
                return Ok(Expiry::NonExpiring)
            }
            Err(e) => return Err(e),
        };

        let now_secs = now.timestamp_millis() as f64 / 1000.0;
        if exp < now_secs {
            Ok(Expiry::Expired { exp })
        } else {
            Ok(Expiry::Active { exp })
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for TokenClaims {
    fn from(claims: Map<String, Value>) -> Self {
        Self(claims)
    }
}
