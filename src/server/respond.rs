//! Formatted responses.
//!
//! Handlers report their outcome as a [`FormatResult`]; [`Formatted`] turns
//! it into an HTTP response in the negotiated format.
//!
//! | Result | Response |
//! |--------|----------|
//! | `Success(body)` starting with `<!DOCTYPE html>` | `200`, `text/html;charset=...` |
//! | `Success(body)` | `200`, `<negotiated type>;charset=...` |
//! | `Failure(status, message)` | `status`, message as plain text |

use super::middleware::NegotiatedFormat;
use crate::error::ConnegError;
use crate::protocol::constants::{HTML_DOCTYPE, HTML_RESPONSE_TYPE};
use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

/// Outcome of a handler, before formatting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormatResult {
    /// A rendered body in the negotiated format.
    Success(String),
    /// An error status and a human-readable message.
    Failure(StatusCode, String),
}

impl FormatResult {
    /// A successful body.
    pub fn success(body: impl Into<String>) -> Self {
        FormatResult::Success(body.into())
    }

    /// A failure with `status` and `message`.
    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        FormatResult::Failure(status, message.into())
    }
}

impl From<ConnegError> for FormatResult {
    fn from(err: ConnegError) -> Self {
        FormatResult::Failure(err.status(), err.to_string())
    }
}

/// A [`FormatResult`] bound to the request's [`NegotiatedFormat`].
#[derive(Clone, Debug)]
pub struct Formatted {
    negotiated: NegotiatedFormat,
    result: FormatResult,
}

impl Formatted {
    /// Bind `result` to `negotiated`.
    #[must_use]
    pub fn new(negotiated: NegotiatedFormat, result: FormatResult) -> Self {
        Self { negotiated, result }
    }

    /// The `Content-Type` a successful `body` is served with.
    #[must_use]
    pub fn content_type_for(&self, body: &str) -> String {
        let mime_type = if body.starts_with(HTML_DOCTYPE) {
            HTML_RESPONSE_TYPE
        } else {
            self.negotiated.content_type.as_str()
        };
        format!("{};charset={}", mime_type, self.negotiated.charset)
    }
}

impl IntoResponse for Formatted {
    fn into_response(self) -> Response {
        let body = match self.result {
            FormatResult::Failure(status, message) => return (status, message).into_response(),
            FormatResult::Success(ref body) => body,
        };

        let content_type = self.content_type_for(body);
        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(Bytes::from(body.clone())))
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, format = %self.negotiated.format, "Invalid response content type");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            })
    }
}
