//! Error types for the request executor.
//!
//! # Design
//! `ApiError` is internal plumbing: `build_request`, the transport and
//! `parse_response` return it through `?`, and `Executor::execute` folds
//! every variant into a `CallResult::Failure`. Nothing in this enum ever
//! reaches the caller of `execute` as an `Err`.

use thiserror::Error;

/// Errors raised while building, sending or parsing a single call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request could not be built (empty or non-absolute URL).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// DNS failure, refused connection, TLS error or timeout.
    #[error("transport error: {0}")]
    Transport(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} {reason}{}", excerpt(body))]
    Http {
        status: u16,
        reason: String,
        body: String,
    },

    /// A 2xx response body was not valid JSON.
    #[error("response is not valid JSON: {0}")]
    Deserialization(String),

    /// The derived POST body could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Status code carried by HTTP-level failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

const EXCERPT_LIMIT: usize = 200;

fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return String::new();
    }
    let mut cut: String = body.chars().take(EXCERPT_LIMIT).collect();
    if cut.len() < body.len() {
        cut.push_str("...");
    }
    format!(": {cut}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_message_includes_status_and_reason() {
        let err = ApiError::Http {
            status: 404,
            reason: "Not Found".to_string(),
            body: String::new(),
        };
        assert_eq!(err.to_string(), "HTTP 404 Not Found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn http_error_message_truncates_long_bodies() {
        let err = ApiError::Http {
            status: 500,
            reason: "Internal Server Error".to_string(),
            body: "x".repeat(1000),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("HTTP 500 Internal Server Error: xxx"));
        assert!(msg.ends_with("..."));
        assert!(msg.len() < 300);
    }

    #[test]
    fn transport_error_has_no_status() {
        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.to_string(), "transport error: connection refused");
    }
}
