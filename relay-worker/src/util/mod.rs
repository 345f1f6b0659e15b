//! Shared helpers.

pub mod http;

pub use http::{build_client, default_headers, USER_AGENT};
