//! HTTP client for sending messages to an A2A endpoint

use super::response::ClientResponse;
use crate::config::ClientConfig;
use crate::error::{Result, TransportError};
use crate::protocol::{JsonCodec, Message};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for a single remote A2A endpoint
#[derive(Debug, Clone)]
pub struct A2aClient {
    base_url: String,
    timeout: Duration,
    http_client: Client,
}

impl A2aClient {
    /// Create a client for `base_url` with the default 30 second timeout
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with an explicit request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(TransportError::Network)?;

        Self::with_http_client(base_url, timeout, http_client)
    }

    /// Create client with custom HTTP client
    pub fn with_http_client(
        base_url: impl Into<String>,
        timeout: Duration,
        http_client: Client,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if reqwest::Url::parse(&base_url).is_err() {
            return Err(TransportError::InvalidUrl(base_url).into());
        }

        info!("Initialized A2A client for {} (timeout {:?})", base_url, timeout);

        Ok(Self {
            base_url,
            timeout,
            http_client,
        })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_timeout(config.base_url.clone(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Send one message and wait for the reply.
    ///
    /// Returns `Ok(None)` when the server answered 200 with a body that is
    /// not valid JSON. Any other status is an error.
    pub async fn send_message(&self, message: &Message) -> Result<Option<ClientResponse>> {
        debug!("Sending message {} to {}", message.message_id(), self.base_url);

        let response = self
            .http_client
            .post(&self.base_url)
            .header("Content-Type", "application/json")
            .timeout(self.timeout)
            .body(JsonCodec::to_bytes(message))
            .send()
            .await
            .map_err(|e| self.map_error(e))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            warn!("A2A request failed with status {}: {}", status, body);
            return Err(TransportError::Status { status, body }.into());
        }

        let body = response.bytes().await.map_err(|e| self.map_error(e))?;

        match serde_json::from_slice::<Value>(&body) {
            Ok(value) => Ok(Some(ClientResponse::from_value(&value))),
            Err(e) => {
                warn!("Reply from {} is not valid JSON: {}", self.base_url, e);
                Ok(None)
            }
        }
    }

    /// Convenience wrapper sending a plain user message
    pub async fn send_text(&self, text: impl Into<String>) -> Result<Option<ClientResponse>> {
        self.send_message(&Message::user(text)).await
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            TransportError::Network(err)
        }
    }
}
