//! Uniform error for every call made against the REST backend.
//!
//! The backend reports failures as a JSON object with a `message` field.
//! Callers pass a static fallback that is shown when the body carries no
//! usable message (non-JSON body, empty message, proxy error page).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure body returned by the backend on non-2xx responses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    #[error("Failed to send request: {0}")]
    Network(String),

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Decode(String),

    #[error("Request was cancelled")]
    Aborted,

    #[error("You are not signed in")]
    NotSignedIn,
}

impl FetchError {
    /// Build an HTTP error from a failed response.
    ///
    /// Uses the body's `message` field when it is present and non-blank,
    /// otherwise `fallback`.
    pub fn from_response(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.message)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| fallback.to_string());

        FetchError::Http { status, message }
    }

    /// True when the request was cancelled by its owner (page unmounted).
    /// Such errors are never shown to the user.
    pub fn is_aborted(&self) -> bool {
        matches!(self, FetchError::Aborted)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_from_body() {
        let err = FetchError::from_response(
            400,
            r#"{"message":"Invoice number already exists"}"#,
            "Failed to save invoice",
        );
        assert_eq!(err.to_string(), "Invoice number already exists");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_fallback_when_body_has_no_message() {
        let err = FetchError::from_response(500, "<html>Bad Gateway</html>", "Failed to load payables");
        assert_eq!(err.to_string(), "Failed to load payables");

        let err = FetchError::from_response(404, r#"{"detail":"not found"}"#, "Failed to load drugs");
        assert_eq!(err.to_string(), "Failed to load drugs");

        let err = FetchError::from_response(422, r#"{"message":"   "}"#, "Failed to update profile");
        assert_eq!(err.to_string(), "Failed to update profile");
    }

    #[test]
    fn test_aborted_is_flagged() {
        assert!(FetchError::Aborted.is_aborted());
        assert!(!FetchError::Network("offline".into()).is_aborted());
        assert_eq!(FetchError::NotSignedIn.status(), None);
    }
}
