//! Axum middleware that negotiates the response format of every request.
//!
//! # Usage
//!
//! ```ignore
//! use axum::{middleware::from_fn, routing::get, Router};
//! use conneg_axum_http::{NegotiateLayer, NegotiatedFormat, FormatResult, Negotiator};
//!
//! async fn handler(negotiated: NegotiatedFormat) -> impl axum::response::IntoResponse {
//!     negotiated.respond(FormatResult::success(format!("served as {}", negotiated.format)))
//! }
//!
//! let layer = NegotiateLayer::new(Negotiator::default(), ["html", "json", "turtle"]);
//! let app: Router = Router::new()
//!     .route("/resource", get(handler))
//!     .layer(from_fn(layer.middleware()));
//! ```
//!
//! # How It Works
//!
//! For each request the middleware:
//! 1. Uses the `format` query parameter verbatim when it is present and non-empty
//! 2. Otherwise negotiates against the request headers
//! 3. Resolves the response content type for the chosen format
//! 4. Attaches a [`NegotiatedFormat`] to the request extensions
//!
//! An unparseable `Accept` header is handled according to
//! [`ServerConfig::malformed_accept`].

use super::config::{MalformedAccept, ServerConfig};
use super::respond::{FormatResult, Formatted};
use crate::error::{ConnegError, Result};
use crate::negotiate::Negotiator;
use crate::protocol::constants::{
    DEFAULT_CHARSET, DEFAULT_RESPONSE_TYPE, FALLBACK_FORMAT, HTML_RESPONSE_TYPE,
};
use axum::{
    extract::{FromRequestParts, Request},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use std::sync::Arc;

/// The outcome of negotiation for one request.
///
/// Inserted into request extensions by [`NegotiateLayer`] and extractable in
/// handlers. Without the middleware, extraction yields
/// [`NegotiatedFormat::fallback`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NegotiatedFormat {
    /// Chosen format identifier.
    pub format: String,
    /// Content type to serve that format as.
    pub content_type: String,
    /// Charset appended to the content type.
    pub charset: String,
}

impl NegotiatedFormat {
    /// HTML, served as `text/html;charset=UTF-8`.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            format: FALLBACK_FORMAT.to_string(),
            content_type: HTML_RESPONSE_TYPE.to_string(),
            charset: DEFAULT_CHARSET.to_string(),
        }
    }

    /// Wrap a handler result into a response in this format.
    #[must_use]
    pub fn respond(&self, result: FormatResult) -> Formatted {
        Formatted::new(self.clone(), result)
    }
}

impl<S> FromRequestParts<S> for NegotiatedFormat
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<NegotiatedFormat>()
            .cloned()
            .unwrap_or_else(NegotiatedFormat::fallback))
    }
}

/// Axum middleware layer that negotiates response formats.
///
/// Holds the shared [`Negotiator`], the formats the wrapped routes can
/// produce, and the [`ServerConfig`]. Cloning is cheap.
#[derive(Clone, Debug)]
pub struct NegotiateLayer {
    negotiator: Negotiator,
    supported: Arc<[String]>,
    config: Arc<ServerConfig>,
}

impl NegotiateLayer {
    /// Create a layer with default configuration.
    pub fn new<I, S>(negotiator: Negotiator, supported: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            negotiator,
            supported: supported.into_iter().map(Into::into).collect(),
            config: Arc::new(ServerConfig::default()),
        }
    }

    /// Replace the configuration.
    #[must_use]
    pub fn with_config(mut self, config: ServerConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    /// The layer's configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Formats the wrapped routes can produce.
    #[inline]
    #[must_use]
    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// Negotiate the format for a request.
    ///
    /// # Errors
    ///
    /// Returns [`ConnegError::HeaderParse`] for a malformed `Accept` header
    /// when the policy is [`MalformedAccept::Reject`].
    pub fn resolve(&self, parts: &Parts) -> Result<NegotiatedFormat> {
        let format = match self.format_override(parts) {
            Some(format) => format,
            None => self.negotiate(parts)?,
        };

        let content_type = self
            .config
            .content_types
            .get(&format)
            .map(String::as_str)
            .or_else(|| self.negotiator.table().primary_type(&format))
            .unwrap_or(DEFAULT_RESPONSE_TYPE)
            .to_string();

        Ok(NegotiatedFormat {
            format,
            content_type,
            charset: self.config.charset.clone(),
        })
    }

    fn format_override(&self, parts: &Parts) -> Option<String> {
        let query = parts.uri.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, value)| *key == self.config.format_param && !value.is_empty())
            .map(|(_, value)| value.into_owned())
    }

    fn negotiate(&self, parts: &Parts) -> Result<String> {
        match self.negotiator.negotiate_headers(&self.supported, &parts.headers) {
            Ok(format) => Ok(format.to_string()),
            Err(err @ ConnegError::HeaderParse(_)) => match self.config.malformed_accept {
                MalformedAccept::Reject => {
                    tracing::warn!(error = %err, "Rejecting request with malformed Accept header");
                    Err(err)
                }
                MalformedAccept::Ignore => {
                    tracing::warn!(error = %err, "Ignoring malformed Accept header");
                    Ok(self.negotiator.negotiate(&self.supported, &[])?.to_string())
                }
            },
            Err(err) => Err(err),
        }
    }

    /// Create the middleware function for use with [`axum::middleware::from_fn`].
    ///
    /// Requests whose format cannot be negotiated are answered directly with
    /// the error's status.
    #[must_use]
    pub fn middleware(
        &self,
    ) -> impl Fn(Request, Next) -> std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>>
           + Send
           + Sync
           + Clone {
        let layer = self.clone();

        move |req: Request, next: Next| {
            let layer = layer.clone();
            let fut: std::pin::Pin<Box<dyn std::future::Future<Output = Response> + Send>> =
                Box::pin(async move {
                    let (mut parts, body) = req.into_parts();
                    match layer.resolve(&parts) {
                        Ok(negotiated) => {
                            parts.extensions.insert(negotiated);
                            next.run(Request::from_parts(parts, body)).await
                        }
                        Err(err) => err.into_response(),
                    }
                });
            fut
        }
    }
}
