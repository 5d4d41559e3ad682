//! Single-slot bearer token store
//!
//! The plain operations degrade instead of failing: unavailable storage and
//! backend errors read as "no token" and writes become no-ops. The `try_`
//! writes report backend errors to callers that must know.

use agentstore_common::config::DEFAULT_TOKEN_KEY;

use crate::backend::TokenStorage;
use crate::error::StorageError;

/// Persists at most one bearer token under a fixed key
#[derive(Debug, Clone)]
pub struct TokenStore<S> {
    storage: S,
    key: String,
}

impl<S: TokenStorage> TokenStore<S> {
    /// Store using the default `auth_token` slot
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_TOKEN_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Currently stored token, or `None` when nothing is stored or storage is unavailable
    pub fn get_token(&self) -> Option<String> {
        if !self.storage.is_available() {
            return None;
        }

        self.storage.get(&self.key).unwrap_or_else(|e| {
            tracing::warn!(error = %e, key = %self.key, "Failed to read stored token");
            None
        })
    }

    /// Store `token` verbatim, replacing any previous value
    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.try_set_token(token) {
            tracing::warn!(error = %e, key = %self.key, "Failed to store token");
        }
    }

    /// Like [`Self::set_token`], but reports backend failures.
    /// Unavailable storage is still a successful no-op.
    pub fn try_set_token(&self, token: &str) -> Result<(), StorageError> {
        if !self.storage.is_available() {
            return Ok(());
        }
        self.storage.set(&self.key, token)
    }

    /// Remove the stored token. Idempotent.
    pub fn remove_token(&self) {
        if let Err(e) = self.try_remove_token() {
            tracing::warn!(error = %e, key = %self.key, "Failed to remove stored token");
        }
    }

    /// Like [`Self::remove_token`], but reports backend failures
    pub fn try_remove_token(&self) -> Result<(), StorageError> {
        if !self.storage.is_available() {
            return Ok(());
        }
        self.storage.remove(&self.key)
    }
}
