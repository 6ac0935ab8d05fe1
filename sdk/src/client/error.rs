//! Client error types.
//!
//! Provides error types for HTTP client operations.

use serde::Deserialize;

use crate::types::primitives::null_as_default;

/// One entry of a 4xx `errors` array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiErrorEntry {
    /// Error code, e.g. `ERR_INSUFFICIENT_CREDIT`.
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    /// Human readable message.
    #[serde(deserialize_with = "null_as_default")]
    pub message: String,
    /// Optional detail; empty when absent or `null`.
    #[serde(deserialize_with = "null_as_default")]
    pub detail: String,
}

/// Client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received.
    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Request timed out.
    #[error("request timeout")]
    Timeout,

    /// A JSON payload could not be encoded or a response body decoded.
    #[error("decode failed: {0}")]
    Decode(String),

    /// The API rejected the request (4xx).
    #[error("[{id}] {message}{}", format_detail(.detail))]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error code.
        id: String,
        /// Error message.
        message: String,
        /// Optional detail.
        detail: Option<String>,
    },

    /// The API failed to handle the request (5xx).
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Error message.
        message: String,
    },

    /// The response status is neither success nor error.
    #[error("unexpected HTTP status {0}")]
    UnexpectedStatus(u16),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

fn format_detail(detail: &Option<String>) -> String {
    match detail {
        Some(detail) if !detail.is_empty() => format!(" (detail: {detail})"),
        _ => String::new(),
    }
}

impl ClientError {
    /// Builds the error surfaced for a 4xx response from its error entry.
    #[must_use]
    pub fn from_entry(status: u16, entry: ApiErrorEntry) -> Self {
        Self::Api {
            status,
            id: entry.id,
            message: entry.message,
            detail: (!entry.detail.is_empty()).then_some(entry.detail),
        }
    }

    /// Returns the HTTP status for API and server errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Server { status, .. } => Some(*status),
            Self::UnexpectedStatus(status) => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_with_detail() {
        let err = ClientError::from_entry(
            422,
            ApiErrorEntry {
                id: "B".to_string(),
                message: "second".to_string(),
                detail: "d".to_string(),
            },
        );
        assert_eq!(err.to_string(), "[B] second (detail: d)");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_api_error_display_without_detail() {
        let err = ClientError::from_entry(
            402,
            ApiErrorEntry {
                id: "ERR_INSUFFICIENT_CREDIT".to_string(),
                message: "You do not have sufficient credit".to_string(),
                detail: String::new(),
            },
        );
        assert_eq!(
            err.to_string(),
            "[ERR_INSUFFICIENT_CREDIT] You do not have sufficient credit"
        );
        assert!(matches!(err, ClientError::Api { detail: None, .. }));
    }

    #[test]
    fn test_server_error_display() {
        let err = ClientError::Server {
            status: 503,
            message: "service unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "service unavailable");
    }

    #[test]
    fn test_client_error_timeout() {
        assert_eq!(ClientError::Timeout.to_string(), "request timeout");
        assert_eq!(ClientError::Timeout.status(), None);
    }

    #[test]
    fn test_decode_from_serde_error() {
        let err: ClientError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
