//! `gloo-net` transport for the gateway client

use async_trait::async_trait;
use gloo_net::http::Request;

use counterparty::gateway::{endpoints, ApiClient, ApiError, ApiResult, HttpRequest, HttpResponse, HttpTransport, Method};

/// Default backend origin
pub const DEFAULT_API_BASE: &str = "http://localhost:8001";

const API_URL_KEY: &str = "counterparty_api_url";

/// The client every page talks to
pub type Client = ApiClient<GlooTransport>;

/// Get the backend origin from local storage or use the default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_URL_KEY).ok().flatten())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    url.trim_end_matches('/').to_string()
}

/// Remember a backend origin for later visits
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_URL_KEY, url.trim());
        }
    }
}

/// A client for the configured backend
pub fn backend() -> Client {
    ApiClient::new(GlooTransport::new(get_api_base()))
}

/// Browser `fetch` transport
#[derive(Debug, Clone)]
pub struct GlooTransport {
    base_url: String,
}

impl GlooTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let url = endpoints::join(&self.base_url, &request.path);

        let builder = match request.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
        };

        let sent = match request.body {
            Some(body) => {
                let built = builder
                    .header("Content-Type", "application/json")
                    .body(body)
                    .map_err(|e| {
                        web_sys::console::error_1(&format!("Request build error: {}", e).into());
                        ApiError::transport()
                    })?;
                built.send().await
            }
            None => builder.send().await,
        };

        let response = sent.map_err(|e| {
            web_sys::console::warn_1(&format!("Network error: {}", e).into());
            ApiError::transport()
        })?;

        let status = response.status();
        let body = response.binary().await.map_err(|e| {
            web_sys::console::warn_1(&format!("Response read error: {}", e).into());
            ApiError::transport()
        })?;

        Ok(HttpResponse { status, body })
    }
}
