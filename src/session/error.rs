//! Session persistence errors

use thiserror::Error;

/// Errors raised by a session storage backend
#[derive(Error, Debug)]
pub enum SessionError {
    /// Reading or writing the persisted session failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted session could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The storage backend refused the operation (e.g. browser storage quota)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Serialization(err.to_string())
    }
}

/// Result type alias for session persistence
pub type SessionResult<T> = Result<T, SessionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SessionError::Unavailable("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Storage unavailable: quota exceeded");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SessionError = json_err.into();
        assert!(matches!(err, SessionError::Serialization(_)));
    }
}
