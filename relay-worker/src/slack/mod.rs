//! Slack side of the relay: message rendering and webhook delivery.

pub mod forwarder;
pub mod message;

pub use forwarder::{Forwarder, SlackForwarder};
pub use message::{format_message, Block, OutboundMessage, Section, TextObject};
