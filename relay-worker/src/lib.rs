//! Workplace → Slack relay.
//!
//! Receives Workplace group-post webhooks, verifies them, looks up the
//! group and author names on the graph API and posts a formatted message
//! to a Slack incoming webhook.
//!
//! ## Architecture
//!
//! ```text
//! Workplace → /api/WorkplaceCallback → handshake / signature check
//!           → decode → per entry: graph lookups → format → Slack webhook
//! ```

pub mod config;
pub mod error;
pub mod process;
pub mod slack;
pub mod util;
pub mod web;
pub mod workplace;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types
pub use config::{Config, SignatureCheck};
pub use error::RelayError;
pub use process::{decode_envelope, relay_envelope};
pub use slack::{format_message, Forwarder, OutboundMessage, SlackForwarder};
pub use web::{router, AppState};
pub use workplace::{GraphNameResolver, InboundEnvelope, NameResolver};
