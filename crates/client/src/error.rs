//! Errors from the catalog API.

use thiserror::Error;

/// Any failed call to the catalog API.
///
/// Transport failures, non-2xx statuses and undecodable bodies are all
/// treated the same by callers: log, notify, leave state as it was.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("{}", format_status(*.status, .message.as_deref()))]
    Status {
        status: u16,
        /// The body's `error` field, if it had one.
        message: Option<String>,
    },

    /// The body was not the JSON we expected.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configured base URL cannot carry a path.
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(String),
}

impl ApiError {
    /// The backend's own error message, if it sent one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// Text for a user-facing notice: the server message verbatim when
    /// present, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    /// HTTP status, when the backend answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn format_status(status: u16, message: Option<&str>) -> String {
    message.map_or_else(
        || format!("API returned HTTP {status}"),
        |message| format!("API returned HTTP {status}: {message}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_server_text() {
        let err = ApiError::Status {
            status: 400,
            message: Some("Category already exists".to_string()),
        };
        assert_eq!(err.user_message("Could not save"), "Category already exists");
        assert_eq!(
            err.to_string(),
            "API returned HTTP 400: Category already exists"
        );
    }

    #[test]
    fn test_user_message_falls_back() {
        let err = ApiError::Status {
            status: 500,
            message: None,
        };
        assert_eq!(err.user_message("Could not save"), "Could not save");
        assert_eq!(err.status(), Some(500));
    }
}
