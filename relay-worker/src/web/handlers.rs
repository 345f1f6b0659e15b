//! Webhook endpoint handlers.
//!
//! The callback handler runs the whole pipeline inline:
//! 1. Answer the subscription handshake, if this is one
//! 2. Verify the payload signature (if configured)
//! 3. Decode the envelope
//! 4. Resolve names, format and forward each entry in order
//!
//! Nothing is queued; the provider gets its response once every entry has
//! been forwarded or the first failure has aborted the request.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SignatureCheck;
use crate::error::RelayError;
use crate::process::{decode_envelope, ensure_body_present, relay_envelope};
use crate::slack::{Forwarder, SlackForwarder};
use crate::util::build_client;
use crate::web::handshake::{verify_handshake, CallbackQuery};
use crate::web::signature::{validate_signature, SIGNATURE_HEADER};
use crate::workplace::{GraphNameResolver, NameResolver};
use crate::Config;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub signature_check: SignatureCheck,
    pub resolver: Arc<dyn NameResolver>,
    pub forwarder: Arc<dyn Forwarder>,
}

impl AppState {
    pub fn new(
        config: Config,
        resolver: Arc<dyn NameResolver>,
        forwarder: Arc<dyn Forwarder>,
    ) -> Self {
        let signature_check = config.signature_check();
        Self {
            config: Arc::new(config),
            signature_check,
            resolver,
            forwarder,
        }
    }

    /// Wire the graph resolver and Slack forwarder around one shared client.
    pub fn from_config(config: Config) -> Result<Self> {
        let client = build_client(&config)?;
        let resolver = GraphNameResolver::from_config(client.clone(), &config);
        let forwarder = SlackForwarder::from_config(client, &config);
        Ok(Self::new(config, Arc::new(resolver), Arc::new(forwarder)))
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Workplace Callback
// =============================================================================

/// Callback response.
#[derive(Serialize)]
pub struct WebhookResponse {
    pub status: &'static str,
    pub forwarded: usize,
}

/// Workplace callback endpoint, mounted for both GET and POST.
pub async fn workplace_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, RelayError> {
    if let Some(challenge) =
        verify_handshake(&query, state.config.verification_token.as_deref())?
    {
        return Ok((StatusCode::OK, challenge).into_response());
    }

    info!(
        body_length = body.len(),
        has_signature = headers.contains_key(SIGNATURE_HEADER),
        "callback_received"
    );
    debug!(payload = %String::from_utf8_lossy(&body), "callback_payload");

    if let Err(e) = ensure_body_present(&body) {
        warn!("callback_body_missing");
        return Err(e);
    }

    validate_signature(&state.signature_check, &headers, &body)?;

    let envelope = decode_envelope(&body)?;

    let forwarded =
        relay_envelope(&envelope, state.resolver.as_ref(), state.forwarder.as_ref()).await?;

    info!(forwarded = forwarded, "callback_complete");

    Ok((
        StatusCode::OK,
        Json(WebhookResponse {
            status: "forwarded",
            forwarded,
        }),
    )
        .into_response())
}
