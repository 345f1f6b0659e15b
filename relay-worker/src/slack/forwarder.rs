//! Delivery of rendered messages to the Slack incoming webhook.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};

use crate::error::RelayError;
use crate::slack::message::OutboundMessage;
use crate::Config;

const SERVICE: &str = "slack";

/// Longest slice of a failed response body kept in the logs.
const ERROR_BODY_PREVIEW: usize = 200;

/// Sends a rendered message downstream.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, message: &OutboundMessage) -> Result<(), RelayError>;
}

/// `Forwarder` that POSTs to a Slack incoming webhook.
#[derive(Clone)]
pub struct SlackForwarder {
    client: Client,
    webhook_uri: Option<String>,
}

impl SlackForwarder {
    pub fn new(client: Client, webhook_uri: Option<String>) -> Self {
        Self {
            client,
            webhook_uri,
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(client, config.slack_webhook_uri.clone())
    }
}

#[async_trait]
impl Forwarder for SlackForwarder {
    async fn forward(&self, message: &OutboundMessage) -> Result<(), RelayError> {
        let webhook_uri = self.webhook_uri.as_deref().ok_or_else(|| {
            error!("slack_webhook_uri_missing");
            RelayError::ConfigurationMissing("SlackWebhookUri")
        })?;

        // `.json()` sets `Content-Type: application/json`.
        let response = self
            .client
            .post(webhook_uri)
            .json(message)
            .send()
            .await
            .map_err(|e| {
                // Webhook URLs embed their secret in the path.
                let e = e.without_url();
                error!(error = %e, is_timeout = e.is_timeout(), "slack_forward_request_error");
                RelayError::downstream(SERVICE, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status_code = status.as_u16(),
                body_preview = %preview(&body),
                "slack_forward_bad_status"
            );
            return Err(RelayError::downstream(SERVICE, format!("status {status}")));
        }

        info!(
            status_code = status.as_u16(),
            block_count = message.blocks.len(),
            "slack_forward_complete"
        );

        Ok(())
    }
}

fn preview(body: &str) -> &str {
    match body.char_indices().nth(ERROR_BODY_PREVIEW) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}
