//! Unverified token payload decoding and expiry checks
//!
//! Nothing here checks a signature. The results only drive UI gating
//! (show or hide authenticated views); real verification happens server-side.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::claims::TokenClaims;
use crate::error::{DecodeError, ExpiryError};
use crate::types::{Expiry, ExpiryPolicy};

/// Compact tokens are URL-safe and unpadded, but some issuers pad
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the claims payload of `token` without verifying it.
///
/// `token` must be three period-delimited segments; only the middle one is read.
pub fn decode_payload(token: &str) -> Result<TokenClaims, DecodeError> {
    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(DecodeError::MalformedStructure {
            segments: segments.len(),
        });
    }

    let payload = segments[1];
    let engine = if payload.contains(['+', '/']) {
        &STANDARD_LENIENT
    } else {
        &URL_SAFE_LENIENT
    };
    let bytes = engine.decode(payload)?;

    match serde_json::from_slice::<Value>(&bytes)? {
        Value::Object(map) => Ok(TokenClaims::new(map)),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// Decode `token` and compare its expiry against `now`
pub fn check_expiry(
    token: &str,
    now: DateTime<Utc>,
    policy: ExpiryPolicy,
) -> Result<Expiry, ExpiryError> {
    decode_payload(token)?.expiry(now, policy)
}

/// Get the claims payload of `token`, or `None` if it does not decode
pub fn get_token_payload(token: &str) -> Option<TokenClaims> {
    decode_payload(token)
        .map_err(|e| {
            tracing::debug!(error = %e, "Token payload could not be decoded");
        })
        .ok()
}

/// Whether `token` is expired at `now`.
///
/// Fails open: a token that does not decode, or whose `exp` claim is missing
/// or not numeric, counts as expired.
pub fn is_expired_at(token: &str, now: DateTime<Utc>) -> bool {
    match check_expiry(token, now, ExpiryPolicy::RequireExpiry) {
        Ok(expiry) => expiry.is_expired(),
        Err(e) => {
            tracing::debug!(error = %e, "Treating undecodable token as expired");
            true
        }
    }
}

/// Whether `token` is expired according to the wall clock
#[mutants::skip] // Delegates to is_expired_at() with the current time
pub fn is_token_expired(token: &str) -> bool {
    is_expired_at(token, Utc::now())
}
