//! Token lifecycle value types

use serde::Serialize;

/// How a token without an `exp` claim is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryPolicy {
    /// A missing `exp` claim makes the token unusable (treated as expired)
    #[default]
    RequireExpiry,
    /// A missing `exp` claim means the token never expires
    AllowNonExpiring,
}

/// Outcome of comparing a token's `exp` claim against a point in time
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Expiry {
    /// `exp` is at or after the reference time
    Active { exp: f64 },
    /// `exp` is strictly before the reference time
    Expired { exp: f64 },
    /// No `exp` claim, allowed by [`ExpiryPolicy::AllowNonExpiring`]
    NonExpiring,
}

impl Expiry {
    pub fn is_expired(&self) -> bool {
        matches!(self, Expiry::Expired { .. })
    }
}

/// Why the auth gate sent a caller to the login flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateReason {
    NoToken,
    Malformed,
    Expired,
}

impl std::fmt::Display for GateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateReason::NoToken => write!(f, "no token stored"),
            GateReason::Malformed => write!(f, "token is malformed"),
            GateReason::Expired => write!(f, "token has expired"),
        }
    }
}
