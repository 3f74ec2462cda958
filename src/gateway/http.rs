//! Native HTTP transport over `reqwest`

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::client::{HttpRequest, HttpResponse, HttpTransport, Method};
use super::endpoints;
use super::error::{ApiError, ApiResult};

/// Connection settings for the native transport
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Backend origin, e.g. "http://localhost:8001"
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8001".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// `reqwest`-backed transport
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: TransportConfig,
}

impl ReqwestTransport {
    pub fn new(config: TransportConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to create HTTP client");
                ApiError::transport()
            })?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let url = endpoints::join(&self.config.base_url, &request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if let Some(body) = request.body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                tracing::warn!("Backend request timed out");
            } else if e.is_connect() {
                tracing::warn!(base_url = %self.config.base_url, "Backend connection refused");
            } else {
                tracing::warn!(error = %e, "Backend request failed");
            }
            ApiError::transport()
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            tracing::warn!(error = %e, "Backend response interrupted");
            ApiError::transport()
        })?;

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
