//! Backend paths
//!
//! Relative URLs for every operation, shared by the native and browser
//! clients. Tokens travel as the `token` query parameter.

use urlencoding::encode;

use crate::model::Currency;

pub const LOGIN: &str = "/api/login";
pub const REGISTER: &str = "/api/register";
pub const CITIES: &str = "/api/cities";

pub fn search_applications(target_city: &str, token: &str) -> String {
    format!(
        "/api/applications/search?target_city={}&token={}",
        encode(target_city),
        encode(token)
    )
}

pub fn currency_rates(base: Currency) -> String {
    format!("/api/currency/rates/{}", base.code())
}

pub fn my_applications(token: &str) -> String {
    format!("/api/my/applications?token={}", encode(token))
}

pub fn create_application(token: &str) -> String {
    format!("/api/applications?token={}", encode(token))
}

pub fn user_profile(user_id: &str, token: &str) -> String {
    format!("/api/user/{}?token={}", encode(user_id), encode(token))
}

pub fn toggle_like(user_id: &str, token: &str) -> String {
    format!("/api/likes/{}?token={}", encode(user_id), encode(token))
}

pub fn post_comment(token: &str) -> String {
    format!("/api/comments?token={}", encode(token))
}

/// Join a base URL (with or without trailing slash) and a path
pub fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}
