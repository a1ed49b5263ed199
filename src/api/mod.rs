//! REST API clients
//!
//! Thin clients for the two recommendation endpoints:
//!
//! - `GET /api/autocomplete/?query=<text>` — work title suggestions
//! - `GET /api/search/?query=<text>&works=<title>...` — similar works
//!
//! Autocomplete is best-effort and swallows failures; search surfaces a
//! single [`ApiError`] outcome per call with no retries.

mod autocomplete;
mod search;
mod throttle;

pub use autocomplete::{AutocompleteClient, Suggestion};
pub use search::{Creator, SearchClient, SearchResultItem, Trope};
pub use throttle::{Throttle, Ticket};

use thiserror::Error;

/// API request errors
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network error (connection failed, timeout, etc.)
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response; the body is not consulted
    #[error("server returned status {0}")]
    Status(u16),

    /// Response body decoding error
    #[error("failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_network() {
        let err = ApiError::Network("connection refused".to_string());
        assert!(err.to_string().contains("network error"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_error_display_status() {
        let err = ApiError::Status(500);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn test_error_display_parse() {
        let err = ApiError::Parse("unexpected end of input".to_string());
        assert!(err.to_string().contains("parse"));
    }
}
