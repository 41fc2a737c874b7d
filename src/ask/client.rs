use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::core::DEFAULT_ASK_URL;

/// Body of a `POST /ask` request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AskRequest {
    pub message: String,
    pub session_id: String,
}

impl AskRequest {
    pub fn new(message: &str, session_id: &str) -> Self {
        Self {
            message: message.to_string(),
            session_id: session_id.to_string(),
        }
    }
}

/// Anything that can answer an `AskRequest` with a parsed JSON body.
/// The shape of the body is left to the caller to interpret.
#[async_trait]
pub trait AskBackend {
    async fn ask(&self, request: &AskRequest) -> Result<Value, Error>;
}

pub type SharedAskBackend = Arc<dyn AskBackend + Send + Sync + 'static>;

/// Talks to the agent server over HTTP.
pub struct HttpAskBackend {
    url: String,
    timeout: Option<Duration>,
    client: reqwest::Client,
}

impl HttpAskBackend {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            timeout: None,
            client: reqwest::Client::new(),
        }
    }

    /// Requests wait forever for a reply unless a timeout is set.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Default for HttpAskBackend {
    fn default() -> Self {
        Self::new(DEFAULT_ASK_URL)
    }
}

#[async_trait]
impl AskBackend for HttpAskBackend {
    async fn ask(&self, request: &AskRequest) -> Result<Value, Error> {
        tracing::debug!(
            "POST {} session_id={} message={:?}",
            self.url,
            request.session_id,
            request.message
        );

        let mut builder = self
            .client
            .post(&self.url)
            .header("Content-Type", "application/json")
            .json(request);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder
            .send()
            .await
            .with_context(|| format!("Request to {} failed", self.url))?;

        // The status is not checked, an error page with a JSON body is
        // rendered the same as a successful reply.
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("{} responded with status {}", self.url, status);
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {}", self.url))?;
        tracing::debug!("Response {}: {}", status, body);

        let value: Value = serde_json::from_str(&body)
            .with_context(|| format!("Response from {} is not valid JSON", self.url))?;

        Ok(value)
    }
}
