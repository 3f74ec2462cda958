//! Gateway error types
//!
//! Every failed backend call collapses into one `ApiError` carrying a
//! user-facing message and, when a response arrived, its HTTP status.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Message shown when no response was received
pub const TRANSPORT_FALLBACK: &str = "Unable to reach the server. Check your connection and try again.";

/// Normalized failure of a backend operation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Expired or invalid credentials/token (HTTP 401/403)
    #[error("{message}")]
    Auth { message: String, status: u16 },

    /// Backend rejected the input (any other 4xx); message is the backend's
    #[error("{message}")]
    Validation { message: String, status: u16 },

    /// Backend failed (5xx) or answered with a body we could not read
    #[error("{message}")]
    Server { message: String, status: u16 },

    /// No response received
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    pub fn transport() -> Self {
        ApiError::Transport(TRANSPORT_FALLBACK.to_string())
    }

    /// Classify a non-success response.
    ///
    /// The message is the backend's `detail` when it has one, otherwise
    /// `fallback`.
    pub fn from_response(status: u16, body: &[u8], fallback: &str) -> Self {
        let message = extract_detail(body).unwrap_or_else(|| fallback.to_string());

        match status {
            401 | 403 => ApiError::Auth { message, status },
            400..=499 => ApiError::Validation { message, status },
            _ => ApiError::Server { message, status },
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::Auth { message, .. }
            | ApiError::Validation { message, .. }
            | ApiError::Server { message, .. } => message,
            ApiError::Transport(message) => message,
        }
    }

    /// HTTP status, absent for transport failures
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status, .. }
            | ApiError::Validation { status, .. }
            | ApiError::Server { status, .. } => Some(*status),
            ApiError::Transport(_) => None,
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth { .. })
    }
}

/// Result type for gateway operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Pull a displayable message out of an error body.
///
/// `detail` is either a string or, for request validation failures, a list
/// of `{loc, msg, type}` objects whose messages are joined.
fn extract_detail(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;

    match value.get("detail")? {
        serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let messages: Vec<String> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .map(|m| m.trim_start_matches("Value error, ").to_string())
                .collect();
            if messages.is_empty() {
                None
            } else {
                Some(messages.join("; "))
            }
        }
        _ => None,
    }
}

/// Turn a received response into a typed result
pub fn decode_response<T: DeserializeOwned>(status: u16, body: &[u8], fallback: &str) -> ApiResult<T> {
    if !(200..300).contains(&status) {
        return Err(ApiError::from_response(status, body, fallback));
    }

    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(status, error = %e, "Undecodable response body");
        ApiError::Server {
            message: fallback.to_string(),
            status,
        }
    })
}
