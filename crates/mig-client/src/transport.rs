//! Transport layer: fetches raw envelopes from the MIG API
//!
//! The client only needs one primitive, "GET this endpoint with these query
//! parameters and give me the envelope". [`HttpTransport`] does it over
//! HTTP; tests use [`crate::fakes::MemoryTransport`].

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::envelope::Envelope;
use crate::error::ClientError;
use crate::Result;

/// Query parameters, in the order they are sent
pub type Query<'a> = [(&'a str, String)];

#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `endpoint` relative to the API root and decode the envelope.
    async fn get_resource(&self, endpoint: &str, query: &Query<'_>) -> Result<Envelope>;
}

/// `reqwest`-backed transport
pub struct HttpTransport {
    config: ApiConfig,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let config = config.validate()?;
        let http_client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(HttpTransport {
            config,
            http_client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get_resource(&self, endpoint: &str, query: &Query<'_>) -> Result<Envelope> {
        let url = format!("{}{}", self.config.base_url, endpoint);
        debug!(url = %url, ?query, "requesting API resource");

        let response = self.http_client.get(&url).query(query).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<Envelope>(&body)
                .ok()
                .and_then(|env| env.error_message().map(str::to_string))
                .unwrap_or_else(|| status.to_string());
            warn!(url = %url, status = status.as_u16(), "API request failed");
            return Err(ClientError::Transport(format!(
                "HTTP {} from {}: {}",
                status.as_u16(),
                endpoint,
                message
            )));
        }

        serde_json::from_str(&body)
            .map_err(|e| ClientError::Transport(format!("invalid envelope from {endpoint}: {e}")))
    }
}
