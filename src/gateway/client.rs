//! API client
//!
//! Maps each backend operation onto one request over an [`HttpTransport`] and
//! decodes the reply.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::dto::{
    AuthSession, CitiesResponse, CommentRequest, CreatedApplicationResponse, LikeOutcome,
    LoginRequest, MyApplicationsResponse, NewApplication, RatesResponse, RegisterRequest,
    SearchResponse, UserProfile,
};
use super::endpoints;
use super::error::{decode_response, ApiError, ApiResult};
use super::Backend;
use crate::model::{Application, Currency, CurrencyRateTable, MatchedApplication};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request ready to hand to a transport
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    /// Path and query, relative to the backend base URL
    pub path: String,
    /// JSON body
    pub body: Option<String>,
}

/// Whatever the backend answered, success or not
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Moves bytes to and from the backend.
///
/// Implementations return `Err` only when no response was received, mapped
/// to [`ApiError::Transport`]. Any HTTP status is an `Ok` response.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse>;
}

/// Backend client over a transport
#[derive(Debug, Clone)]
pub struct ApiClient<T> {
    transport: T,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn get<R: DeserializeOwned>(&self, path: String, fallback: &str) -> ApiResult<R> {
        self.call(
            HttpRequest {
                method: Method::Get,
                path,
                body: None,
            },
            fallback,
        )
        .await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: String,
        body: Option<&B>,
        fallback: &str,
    ) -> ApiResult<R> {
        let body = body
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| ApiError::Server {
                message: format!("Request build error: {}", e),
                status: 0,
            })?;

        self.call(
            HttpRequest {
                method: Method::Post,
                path,
                body,
            },
            fallback,
        )
        .await
    }

    async fn call<R: DeserializeOwned>(&self, request: HttpRequest, fallback: &str) -> ApiResult<R> {
        let method = request.method;
        // Tokens ride in the query string; keep them out of the logs
        let route = request.path.split('?').next().unwrap_or_default().to_string();

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(?method, route = %route, error = %e, "Backend unreachable");
            e
        })?;

        tracing::debug!(?method, route = %route, status = response.status, "Backend responded");
        decode_response(response.status, &response.body, fallback)
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport> Backend for ApiClient<T> {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthSession> {
        self.post(endpoints::LOGIN.to_string(), Some(credentials), "Login failed")
            .await
    }

    async fn register(&self, profile: &RegisterRequest) -> ApiResult<AuthSession> {
        self.post(endpoints::REGISTER.to_string(), Some(profile), "Registration failed")
            .await
    }

    async fn search_applications(
        &self,
        target_city: &str,
        token: &str,
    ) -> ApiResult<Vec<MatchedApplication>> {
        let response: SearchResponse = self
            .get(
                endpoints::search_applications(target_city, token),
                "Search failed",
            )
            .await?;
        Ok(response.applications)
    }

    async fn currency_rates(&self, base: Currency) -> ApiResult<CurrencyRateTable> {
        let response: RatesResponse = self
            .get(endpoints::currency_rates(base), "Failed to load currency rates")
            .await?;
        Ok(CurrencyRateTable::new(base, response.rates))
    }

    async fn my_applications(&self, token: &str) -> ApiResult<Vec<Application>> {
        let response: MyApplicationsResponse = self
            .get(
                endpoints::my_applications(token),
                "Failed to load applications",
            )
            .await?;
        Ok(response.applications)
    }

    async fn create_application(
        &self,
        token: &str,
        draft: &NewApplication,
    ) -> ApiResult<Application> {
        let response: CreatedApplicationResponse = self
            .post(
                endpoints::create_application(token),
                Some(draft),
                "Failed to create application",
            )
            .await?;
        Ok(response.application)
    }

    async fn fetch_user_profile(&self, user_id: &str, token: &str) -> ApiResult<UserProfile> {
        self.get(
            endpoints::user_profile(user_id, token),
            "Failed to load profile",
        )
        .await
    }

    async fn toggle_like(&self, user_id: &str, token: &str) -> ApiResult<LikeOutcome> {
        self.post::<(), _>(
            endpoints::toggle_like(user_id, token),
            None,
            "Failed to toggle like",
        )
        .await
    }

    async fn post_comment(
        &self,
        token: &str,
        target_user_id: &str,
        content: &str,
    ) -> ApiResult<()> {
        let body = CommentRequest {
            target_user_id: target_user_id.to_string(),
            content: content.to_string(),
        };
        // The acknowledgement body carries nothing the client relies on
        let _ack: serde_json::Value = self
            .post(
                endpoints::post_comment(token),
                Some(&body),
                "Failed to add comment",
            )
            .await?;
        Ok(())
    }

    async fn cities(&self) -> ApiResult<Vec<String>> {
        let response: CitiesResponse = self
            .get(endpoints::CITIES.to_string(), "Failed to load cities")
            .await?;
        Ok(response.cities)
    }
}
