//! API Gateway
//!
//! Typed access to the marketplace backend. Each operation issues exactly one
//! HTTP request, attaches the bearer token where the endpoint needs one, and
//! normalizes failures into [`ApiError`].
//!
//! ## Endpoints
//!
//! - `POST /api/login`, `POST /api/register` - obtain `{user, access_token}`
//! - `GET /api/applications/search?target_city=&token=` - counterparties in a city
//! - `GET /api/currency/rates/USD` - display rates
//! - `GET /api/my/applications?token=` - the caller's applications
//! - `POST /api/applications?token=` - post a new application
//! - `GET /api/user/:id?token=` - comments and like state of a user
//! - `POST /api/likes/:id?token=` - toggle a like
//! - `POST /api/comments?token=` - leave a comment
//! - `GET /api/cities` - supported cities
//!
//! The [`Backend`] trait is the seam page controllers depend on. [`ApiClient`]
//! implements it over any [`HttpTransport`]; the native build ships
//! [`ReqwestTransport`].

mod client;
pub mod dto;
pub mod endpoints;
mod error;
#[cfg(feature = "native")]
mod http;

pub use client::{ApiClient, HttpRequest, HttpResponse, HttpTransport, Method};
pub use dto::{AuthSession, CommentRequest, LikeOutcome, LoginRequest, NewApplication, RegisterRequest, UserProfile};
pub use error::{decode_response, ApiError, ApiResult, TRANSPORT_FALLBACK};
#[cfg(feature = "native")]
pub use http::{ReqwestTransport, TransportConfig};

use async_trait::async_trait;

use crate::model::{Application, Currency, CurrencyRateTable, MatchedApplication};

/// Backend operations used by the page controllers.
///
/// Futures are not `Send`: the client runs on a single UI thread.
#[async_trait(?Send)]
pub trait Backend {
    async fn login(&self, credentials: &LoginRequest) -> ApiResult<AuthSession>;

    /// The birth date in `profile` must already be normalized to ISO-8601
    async fn register(&self, profile: &RegisterRequest) -> ApiResult<AuthSession>;

    async fn search_applications(
        &self,
        target_city: &str,
        token: &str,
    ) -> ApiResult<Vec<MatchedApplication>>;

    async fn currency_rates(&self, base: Currency) -> ApiResult<CurrencyRateTable>;

    async fn my_applications(&self, token: &str) -> ApiResult<Vec<Application>>;

    async fn create_application(
        &self,
        token: &str,
        draft: &NewApplication,
    ) -> ApiResult<Application>;

    async fn fetch_user_profile(&self, user_id: &str, token: &str) -> ApiResult<UserProfile>;

    async fn toggle_like(&self, user_id: &str, token: &str) -> ApiResult<LikeOutcome>;

    /// Nothing is returned; reload the profile to see the comment
    async fn post_comment(&self, token: &str, target_user_id: &str, content: &str)
        -> ApiResult<()>;

    async fn cities(&self) -> ApiResult<Vec<String>>;
}
