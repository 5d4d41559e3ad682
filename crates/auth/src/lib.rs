//! Client-side bearer token handling for the Agent Store
//!
//! Provides a single-slot token store over an injected storage capability,
//! unverified claims decoding with fail-open expiry checks, and an auth gate
//! that decides between showing an authenticated view and redirecting to login.

mod backend;
mod claims;
mod config;
mod context;
mod error;
mod file;
mod jwt;
mod store;
mod types;

pub use backend::{MemoryStorage, NullStorage, TokenStorage};
pub use claims::TokenClaims;
pub use config::AuthConfig;
pub use context::{AuthGate, GateDecision};
pub use error::{DecodeError, ExpiryError, StorageError};
pub use file::FileStorage;
pub use jwt::{check_expiry, decode_payload, get_token_payload, is_expired_at, is_token_expired};
pub use store::TokenStore;
pub use types::{Expiry, ExpiryPolicy, GateReason};
