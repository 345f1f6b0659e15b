//! Subscription handshake.
//!
//! Before delivering events the provider calls the endpoint with
//! `hub.mode=subscribe`, the configured verify token and a challenge. The
//! challenge must be echoed back verbatim.

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::RelayError;
use crate::web::signature::constant_time_compare;

const SUBSCRIBE_MODE: &str = "subscribe";

/// Query parameters of the callback route. All are optional; only a
/// handshake request carries them.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackQuery {
    #[serde(rename = "hub.mode")]
    pub hub_mode: Option<String>,
    #[serde(rename = "hub.verify_token")]
    pub hub_verify_token: Option<String>,
    #[serde(rename = "hub.challenge")]
    pub hub_challenge: Option<String>,
}

impl CallbackQuery {
    pub fn is_handshake(&self) -> bool {
        self.hub_mode.as_deref() == Some(SUBSCRIBE_MODE)
    }
}

/// Answer a handshake request.
///
/// Returns `Ok(None)` when the request is not a handshake, `Ok(Some(challenge))`
/// when the verify token matches, and `HandshakeRejected` otherwise. With no
/// token configured every handshake is rejected.
pub fn verify_handshake(
    query: &CallbackQuery,
    expected_token: Option<&str>,
) -> Result<Option<String>, RelayError> {
    if !query.is_handshake() {
        return Ok(None);
    }

    let verified = match (query.hub_verify_token.as_deref(), expected_token) {
        (Some(provided), Some(expected)) => constant_time_compare(provided, expected),
        (None, _) => {
            warn!("handshake_token_missing");
            false
        }
        (_, None) => {
            warn!("handshake_token_not_configured");
            false
        }
    };

    if !verified {
        warn!("handshake_rejected");
        return Err(RelayError::HandshakeRejected);
    }

    info!("handshake_verified");
    Ok(Some(query.hub_challenge.clone().unwrap_or_default()))
}
