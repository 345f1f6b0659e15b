//! Error taxonomy for the callback pipeline.
//!
//! Validation failures become clean 4xx responses. Configuration and
//! downstream failures abort the request and surface as 5xx.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("handshake verify token rejected")]
    HandshakeRejected,

    #[error("payload signature missing or invalid")]
    Unauthorized,

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("{0} is not configured")]
    ConfigurationMissing(&'static str),

    #[error("{service} call failed: {reason}")]
    DownstreamFailure {
        service: &'static str,
        reason: String,
    },
}

impl RelayError {
    pub fn downstream(service: &'static str, reason: impl Into<String>) -> Self {
        RelayError::DownstreamFailure {
            service,
            reason: reason.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::HandshakeRejected | RelayError::MalformedPayload(_) => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::ConfigurationMissing(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::DownstreamFailure { .. } => StatusCode::BAD_GATEWAY,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            RelayError::HandshakeRejected => "handshake_rejected",
            RelayError::Unauthorized => "unauthorized",
            RelayError::MalformedPayload(_) => "malformed_payload",
            RelayError::ConfigurationMissing(_) => "configuration_missing",
            RelayError::DownstreamFailure { .. } => "downstream_failure",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, code = self.code(), "callback_failed");
        }
        (status, Json(ErrorBody { status: self.code() })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            RelayError::HandshakeRejected.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            RelayError::MalformedPayload("empty".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(RelayError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            RelayError::ConfigurationMissing("SlackWebhookUri").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            RelayError::downstream("slack", "500").status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_display() {
        let err = RelayError::ConfigurationMissing("SlackWebhookUri");
        assert_eq!(err.to_string(), "SlackWebhookUri is not configured");

        let err = RelayError::downstream("graph", "status 404");
        assert_eq!(err.to_string(), "graph call failed: status 404");
    }
}
