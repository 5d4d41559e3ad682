//! Token decoding and storage errors
//!
//! None of these reach callers of the lenient store and decoder operations;
//! they exist so that tests and stricter callers can inspect why a token was
//! rejected or why a storage backend degraded.

/// Why a token's payload segment could not be turned into claims
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("token must have three segments, found {segments}")]
    MalformedStructure { segments: usize },

    #[error("payload segment is not valid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("payload is not valid JSON: {0}")]
    InvalidJson(String),

    #[error("payload is not a JSON object")]
    NotAnObject,
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::InvalidJson(err.to_string())
    }
}

/// Why an expiry decision could not be made from a token
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExpiryError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("token has no exp claim")]
    MissingExpiry,

    #[error("exp claim is not numeric")]
    InvalidExpiry,
}

/// Failure inside a storage backend
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage contents are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

impl From<StorageError> for agentstore_common::Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Io(e) => agentstore_common::Error::Io(e),
            StorageError::Corrupt(e) => agentstore_common::Error::Storage(e.to_string()),
        }
    }
}
