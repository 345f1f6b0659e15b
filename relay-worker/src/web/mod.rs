//! Web server module for the Workplace callback.
//!
//! This module provides:
//! - The callback route (GET for the subscription handshake, POST for events)
//! - Handshake and signature verification
//! - A health endpoint
//!
//! The callback is processed inline; see [`handlers::workplace_callback`].

pub mod handlers;
pub mod handshake;
pub mod signature;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub use handlers::{health, workplace_callback, AppState, HealthResponse, WebhookResponse};
pub use handshake::{verify_handshake, CallbackQuery};
pub use signature::{
    compute_signature, validate_signature, verify_signature, SIGNATURE_HEADER, SIGNATURE_PREFIX,
};

/// Route the provider is configured to call.
pub const CALLBACK_PATH: &str = "/api/WorkplaceCallback";

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(CALLBACK_PATH, get(workplace_callback).post(workplace_callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
