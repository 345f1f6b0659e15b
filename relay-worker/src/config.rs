//! Configuration module for environment variable parsing.
//!
//! The relay reads its settings once at startup. Variable names for the
//! secrets and endpoints match the ones the function app was deployed with
//! (`VerificationToken`, `AppSecret`, `AccessToken`, `SlackWebhookUri`).

use std::env;
use std::fmt;

use tracing::warn;

/// Default base URL for graph name lookups.
pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com";

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Port for the web server to listen on
    pub port: u16,

    /// Secret echoed back by the provider during the subscription handshake
    pub verification_token: Option<String>,

    /// HMAC-SHA256 key used to sign payloads. `None` disables signature checks.
    pub app_secret: Option<String>,

    /// Graph API access token for name lookups
    pub access_token: Option<String>,

    /// Slack incoming webhook that receives the formatted posts
    pub slack_webhook_uri: Option<String>,

    /// Base URL for graph lookups
    pub graph_api_base: String,

    /// Timeout for every outbound HTTP call, in milliseconds
    pub request_timeout_ms: u64,
}

/// Whether inbound payloads must carry a valid `X-Hub-Signature-256`.
#[derive(Clone, PartialEq, Eq)]
pub enum SignatureCheck {
    /// No secret configured; every payload is trusted.
    Disabled,
    /// Payloads are verified against this secret.
    Enabled(String),
}

impl fmt::Debug for SignatureCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureCheck::Disabled => f.write_str("Disabled"),
            SignatureCheck::Enabled(_) => f.write_str("Enabled(<redacted>)"),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            port: parse_or("PORT", 8080),

            verification_token: non_blank("VerificationToken"),

            app_secret: non_blank("AppSecret"),

            access_token: non_blank("AccessToken"),

            slack_webhook_uri: non_blank("SlackWebhookUri"),

            graph_api_base: non_blank("GRAPH_API_BASE")
                .unwrap_or_else(|| DEFAULT_GRAPH_API_BASE.to_string()),

            request_timeout_ms: parse_or("REQUEST_TIMEOUT_MS", 10_000),
        }
    }

    /// Signature mode derived from `AppSecret`.
    pub fn signature_check(&self) -> SignatureCheck {
        match self.app_secret.as_deref() {
            Some(secret) if !secret.trim().is_empty() => {
                SignatureCheck::Enabled(secret.to_string())
            }
            _ => SignatureCheck::Disabled,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            verification_token: None,
            app_secret: None,
            access_token: None,
            slack_webhook_uri: None,
            graph_api_base: DEFAULT_GRAPH_API_BASE.to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

// Secrets stay out of the logs even at debug level.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("verification_token_set", &self.verification_token.is_some())
            .field("signature_check", &self.signature_check())
            .field("access_token_set", &self.access_token.is_some())
            .field("slack_webhook_uri_set", &self.slack_webhook_uri.is_some())
            .field("graph_api_base", &self.graph_api_base)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .finish()
    }
}

/// Read a variable, treating blank values as unset. Non-blank values are
/// returned verbatim; secrets and tokens must match byte for byte.
fn non_blank(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parse a numeric variable, falling back to `default` when absent or invalid.
fn parse_or<T>(name: &str, default: T) -> T
where
    T: std::str::FromStr + Copy + fmt::Display,
{
    let raw = match non_blank(name) {
        Some(v) => v,
        None => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, default = %default, "Invalid numeric value, using default");
            default
        }
    }
}
