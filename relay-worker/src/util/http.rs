//! Shared outbound HTTP client.
//!
//! One `reqwest::Client` is built at startup and cloned into the name
//! resolver and the forwarder, so every request shares a connection pool.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT as USER_AGENT_HEADER},
    Client,
};

use crate::Config;

/// User agent sent on graph lookups and Slack posts.
pub const USER_AGENT: &str = concat!("workplace-relay/", env!("CARGO_PKG_VERSION"));

/// Build standard headers for outbound requests.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT_HEADER, HeaderValue::from_static(USER_AGENT));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers
}

/// Build the shared client with the configured timeout.
pub fn build_client(config: &Config) -> Result<Client> {
    Client::builder()
        .default_headers(default_headers())
        .timeout(Duration::from_millis(config.request_timeout_ms))
        .build()
        .context("Failed to create HTTP client")
}
