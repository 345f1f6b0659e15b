//! Graph API name lookups.
//!
//! Group and author ids in the webhook are opaque; the display names come
//! from `GET /{id}?fields=name`. Nothing is cached, every callback looks the
//! names up again.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{error, info};
use url::Url;

use crate::error::RelayError;
use crate::workplace::types::NameLookupResult;
use crate::Config;

const SERVICE: &str = "graph";

/// Resolves a platform id to its display name.
#[async_trait]
pub trait NameResolver: Send + Sync {
    async fn resolve_name(&self, id: &str) -> Result<String, RelayError>;
}

/// `NameResolver` backed by the graph API.
#[derive(Clone)]
pub struct GraphNameResolver {
    client: Client,
    api_base: String,
    access_token: Option<String>,
}

impl GraphNameResolver {
    pub fn new(client: Client, api_base: impl Into<String>, access_token: Option<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            access_token,
        }
    }

    pub fn from_config(client: Client, config: &Config) -> Self {
        Self::new(
            client,
            config.graph_api_base.clone(),
            config.access_token.clone(),
        )
    }

    /// Build `{base}/{id}?fields=name&access_token={token}` with proper escaping.
    fn lookup_url(&self, id: &str, access_token: &str) -> Result<Url, RelayError> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| RelayError::downstream(SERVICE, format!("invalid api base: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| RelayError::downstream(SERVICE, "api base cannot carry a path"))?
            .pop_if_empty()
            .push(id);

        url.query_pairs_mut()
            .append_pair("fields", "name")
            .append_pair("access_token", access_token);

        Ok(url)
    }
}

#[async_trait]
impl NameResolver for GraphNameResolver {
    async fn resolve_name(&self, id: &str) -> Result<String, RelayError> {
        let access_token = self
            .access_token
            .as_deref()
            .ok_or(RelayError::ConfigurationMissing("AccessToken"))?;

        let url = self.lookup_url(id, access_token)?;

        info!(id = id, "name_lookup_starting");

        // The token lives in the query string, so errors are logged without the URL.
        let response = self.client.get(url).send().await.map_err(|e| {
            let e = e.without_url();
            if e.is_timeout() {
                error!(id = id, error = %e, "name_lookup_timeout");
            } else {
                error!(id = id, error = %e, "name_lookup_request_error");
            }
            RelayError::downstream(SERVICE, e.to_string())
        })?;

        let status = response.status();
        if !status.is_success() {
            error!(id = id, status_code = status.as_u16(), "name_lookup_bad_status");
            return Err(RelayError::downstream(SERVICE, format!("status {status}")));
        }

        let result: NameLookupResult = response.json().await.map_err(|e| {
            let e = e.without_url();
            error!(id = id, error = %e, "name_lookup_invalid_body");
            RelayError::downstream(SERVICE, format!("invalid body: {e}"))
        })?;

        info!(id = id, name = %result.name, "name_lookup_complete");

        Ok(result.name)
    }
}
