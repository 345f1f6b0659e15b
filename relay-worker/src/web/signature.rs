//! Payload signature verification.
//!
//! The provider signs every delivery with HMAC-SHA256 over the raw body,
//! keyed with the app secret, and sends `sha256=<lowercase hex>` in
//! `X-Hub-Signature-256`.

use axum::http::HeaderMap;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{info, warn};

use crate::config::SignatureCheck;
use crate::error::RelayError;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "X-Hub-Signature-256";

pub const SIGNATURE_PREFIX: &str = "sha256=";

/// Lowercase hex HMAC-SHA256 of `body` keyed with `secret`.
pub fn compute_signature(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("signature_invalid_key");
            return None;
        }
    };
    mac.update(body);
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Verify a `sha256=<hex>` header value against the raw body.
pub fn verify_signature(secret: &str, body: &[u8], header_value: &str) -> bool {
    let provided = match header_value.strip_prefix(SIGNATURE_PREFIX) {
        Some(sig) => sig,
        None => {
            warn!("signature_prefix_missing");
            return false;
        }
    };

    let expected = match compute_signature(secret, body) {
        Some(sig) => sig,
        None => return false,
    };

    // Constant-time comparison to prevent timing attacks
    let valid = constant_time_compare(&expected, provided);

    if !valid {
        warn!(
            expected_length = expected.len(),
            actual_length = provided.len(),
            "signature_mismatch"
        );
    }

    valid
}

/// Enforce the configured signature mode for one request.
pub fn validate_signature(
    check: &SignatureCheck,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<(), RelayError> {
    let secret = match check {
        SignatureCheck::Enabled(secret) => secret,
        SignatureCheck::Disabled => {
            warn!("signature_check_disabled");
            return Ok(());
        }
    };

    let header_value = match headers.get(SIGNATURE_HEADER) {
        Some(v) => v.to_str().map_err(|_| {
            warn!("signature_header_not_ascii");
            RelayError::Unauthorized
        })?,
        None => {
            warn!("signature_header_missing");
            return Err(RelayError::Unauthorized);
        }
    };

    info!(signature_header = %header_value, "signature_header_received");

    if verify_signature(secret, body, header_value) {
        Ok(())
    } else {
        Err(RelayError::Unauthorized)
    }
}

/// Constant-time string comparison to prevent timing attacks.
pub(crate) fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
