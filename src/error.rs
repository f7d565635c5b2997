//! Error types for content negotiation and its collaborators.
//!
//! The [`Result`] type alias is used throughout the crate.
//!
//! # Error Categories
//!
//! | Category | Variants | Client fault |
//! |----------|----------|--------------|
//! | Protocol | `HeaderParse` | Yes |
//! | Configuration | `Config`, `Json`, `Url` | No |
//! | Remote services | `Http`, `Translation` | No |
//!
//! Only malformed request headers are the client's fault; [`ConnegError::status`]
//! maps them to `400 Bad Request` and everything else to `500`.
//!
//! # Examples
//!
//! ```
//! use conneg_axum_http::ConnegError;
//! use http::StatusCode;
//!
//! let err = ConnegError::HeaderParse("invalid quality value 'high'".into());
//! assert_eq!(err.status(), StatusCode::BAD_REQUEST);
//! assert!(err.to_string().contains("high"));
//! ```

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

/// Result type for negotiation operations.
pub type Result<T> = std::result::Result<T, ConnegError>;

/// Errors that can occur while negotiating formats or talking to remote services.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ConnegError {
    /// A request header could not be parsed.
    ///
    /// Raised for `Accept` entries whose `q` weight is not a number. The caller
    /// decides whether to reject the request or ignore the header.
    #[error("Header parse error: {0}")]
    HeaderParse(String),

    /// Invalid configuration (format table, server or gateway settings).
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be parsed.
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level HTTP failure while calling a remote service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The translation service could not be used.
    #[error("Translation error: {0}")]
    Translation(String),
}

impl ConnegError {
    /// HTTP status a server should answer with when this error reaches a handler.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ConnegError::HeaderParse(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ConnegError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
