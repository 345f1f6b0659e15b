//! Payload decoding.

use tracing::warn;

use crate::error::RelayError;
use crate::workplace::InboundEnvelope;

/// Reject an empty or whitespace-only body.
pub fn ensure_body_present(body: &[u8]) -> Result<(), RelayError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(RelayError::MalformedPayload("empty body".to_string()));
    }
    Ok(())
}

/// Decode the raw callback body into an envelope.
///
/// An empty body, or a literal JSON `null`, is rejected before serde sees it
/// as a struct. Structural errors carry serde's message.
pub fn decode_envelope(body: &[u8]) -> Result<InboundEnvelope, RelayError> {
    if let Err(e) = ensure_body_present(body) {
        warn!("payload_empty");
        return Err(e);
    }

    let envelope: Option<InboundEnvelope> = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, body_length = body.len(), "payload_decode_failed");
        RelayError::MalformedPayload(e.to_string())
    })?;

    envelope.ok_or_else(|| {
        warn!("payload_null");
        RelayError::MalformedPayload("null body".to_string())
    })
}
