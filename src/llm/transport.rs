use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::error::ProviderError;
use super::provider::ProviderRequest;

/// Upper bound on a single provider call, connect through body read.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Status and body of a provider reply, not yet interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// POST the request once. Only network-level failures are errors; any
    /// HTTP status comes back as a [`RawResponse`].
    async fn send(&self, request: &ProviderRequest) -> Result<RawResponse, ProviderError>;
}

pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ProviderError> {
        Self::with_timeout(REQUEST_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &ProviderRequest) -> Result<RawResponse, ProviderError> {
        let mut builder = self
            .client
            .post(&request.endpoint)
            .header("content-type", "application/json");
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let resp = builder.json(&request.payload).send().await?;
        let status = resp.status().as_u16();
        let body = resp.text().await?;

        tracing::debug!(status, bytes = body.len(), "provider response received");
        Ok(RawResponse { status, body })
    }
}
