//! Wire types
//!
//! Request and response bodies of the backend's REST contract.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::model::{Application, Comment, Currency, MatchedApplication, UserSnapshot};

// ============ Requests ============

/// `POST /api/login`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /api/register`. `date_of_birth` is ISO-8601.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub city: String,
    pub date_of_birth: String,
    pub password: String,
}

/// `POST /api/applications`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewApplication {
    pub target_city: String,
    pub amount: f64,
    pub currency: Currency,
}

/// `POST /api/comments`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommentRequest {
    pub target_user_id: String,
    pub content: String,
}

// ============ Responses ============

/// Login and registration result
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthSession {
    pub user: UserSnapshot,
    #[serde(rename = "access_token")]
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub applications: Vec<MatchedApplication>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MyApplicationsResponse {
    #[serde(default)]
    pub applications: Vec<Application>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreatedApplicationResponse {
    pub application: Application,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RatesResponse {
    #[serde(default)]
    pub rates: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CitiesResponse {
    #[serde(default)]
    pub cities: Vec<String>,
}

/// Another user's profile as seen by the caller
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserProfile {
    /// Refreshed snapshot of the profile owner, when the backend includes it
    #[serde(default)]
    pub user: Option<UserSnapshot>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub has_liked: bool,
    #[serde(default)]
    pub likes_count: u32,
}

/// Result of toggling a like. Whether the caller now likes the user is not
/// reported; callers track it themselves.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LikeOutcome {
    pub likes_count: u32,
    #[serde(default)]
    pub is_trusted: Option<bool>,
}
