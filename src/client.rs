//! HTTP client for the quickstash capture API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, StashError};
use crate::payload::Capture;

/// Saved-item response returned by every capture endpoint.
///
/// Only `path` is required; it is echoed verbatim in the success message.
#[derive(Debug, Clone, Deserialize)]
pub struct SavedItem {
    pub path: String,
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub processors: Option<Vec<String>>,
}

/// Server health report (`GET /health`).
#[derive(Debug, Clone, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub root: Option<String>,
    #[serde(default)]
    pub bind_host: Option<String>,
    #[serde(default)]
    pub port: Option<u16>,
}

/// Map a non-2xx response into [`StashError::Api`], consuming the body.
/// An empty body falls back to the generic `Request failed: {status}`.
async fn api_error(response: reqwest::Response) -> StashError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = if body.is_empty() {
        format!("Request failed: {}", status)
    } else {
        body
    };
    StashError::Api { status, message }
}

/// HTTP client owning the server base URL and request timeout.
#[derive(Debug, Clone)]
pub struct StashClient {
    base_url: String,
    client: Client,
}

impl StashClient {
    /// Build a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(StashError::Transport)?;
        Ok(Self {
            base_url: config.server_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST one capture to its endpoint as JSON.
    ///
    /// Non-2xx responses map to [`StashError::Api`] with the response body as
    /// the message, falling back to `Request failed: {status}` when the body
    /// is empty.
    pub async fn submit(&self, capture: &Capture) -> Result<SavedItem> {
        let url = format!("{}{}", self.base_url, capture.endpoint());
        debug!("POST {}", url);

        let response = self.client.post(&url).json(capture).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response
            .json::<SavedItem>()
            .await
            .map_err(|e| StashError::InvalidResponse(e.to_string()))
    }

    /// Check that the capture server is reachable and answering.
    pub async fn health(&self) -> Result<Health> {
        let url = format!("{}/health", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        response
            .json::<Health>()
            .await
            .map_err(|e| StashError::InvalidResponse(e.to_string()))
    }
}
