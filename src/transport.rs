//! HTTP transport

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::TransportError;

/// Fixed per-request timeout
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Status line and body of an upstream reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Transport backend interface
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET with the parameters in the query string
    async fn get(&self, url: &str, query: &[(String, String)])
        -> Result<HttpResponse, TransportError>;

    /// POST with the parameters as a form-encoded body
    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<HttpResponse, TransportError>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("shipxy-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransportError::Failed(e.to_string()))?;
        Ok(Self { client, timeout })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<HttpResponse, TransportError> {
        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| self.map_error(e))?;
        debug!("Upstream replied {} with {} bytes", status, body.len());
        Ok(HttpResponse { status, body })
    }

    fn map_error(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            // without_url keeps the API key out of error messages
            TransportError::Failed(err.without_url().to_string())
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        url: &str,
        query: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.send(self.client.get(url).query(query)).await
    }

    async fn post_form(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<HttpResponse, TransportError> {
        self.send(self.client.post(url).form(form)).await
    }
}
