#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Conneg-HTTP: Content Negotiation for Axum
//!
//! This crate chooses the representation a resource is served in from the
//! client's `Accept` header, following the preference ordering and wildcard
//! rules of RFC 2616 §14.1.
//!
//! ## Overview
//!
//! A resource declares the abstract formats it can produce (`"html"`,
//! `"json"`, `"turtle"`, ...). A [`FormatTable`] maps each format to the MIME
//! types it may be served as, and a [`Negotiator`] picks the one format that
//! best satisfies the client:
//!
//! 1. **Candidates** - supported formats are expanded into MIME types
//! 2. **Preferences** - `Accept` is parsed into a list ordered by `q`
//! 3. **Matching** - exact, parameter-stripped, `type/*` and `*/*` matches are
//!    ranked by client preference
//! 4. **Reporting** - the winning MIME type is mapped back to a format, with
//!    `html` as the fallback
//!
//! ## Key Features
//!
//! - **Stable ordering**: equally weighted preferences keep header order
//! - **Layered sources**: explicit overrides can be consulted before headers
//! - **Immutable configuration**: tables are built once and shared lock-free
//! - **Axum integration**: middleware, extractor and formatted responses
//! - **Translation gateway**: cached-token client for a remote translation API
//!
//! ## Negotiating Directly
//!
//! ```
//! use conneg_axum_http::Negotiator;
//! use http::{HeaderMap, HeaderValue};
//!
//! let negotiator = Negotiator::default();
//! let mut headers = HeaderMap::new();
//! headers.insert("accept", HeaderValue::from_static("text/turtle;q=0.8, application/json"));
//!
//! let format = negotiator.negotiate_headers(&["html", "json", "turtle"], &headers).unwrap();
//! assert_eq!(format, "json");
//! ```
//!
//! ## Server Usage
//!
//! ```ignore
//! use axum::{middleware::from_fn, routing::get, Router};
//! use conneg_axum_http::{FormatResult, NegotiateLayer, NegotiatedFormat, Negotiator};
//!
//! async fn concept(negotiated: NegotiatedFormat) -> impl axum::response::IntoResponse {
//!     let body = match negotiated.format.as_str() {
//!         "json" => r#"{"label": "aspirin"}"#.to_string(),
//!         _ => "<!DOCTYPE html><p>aspirin</p>".to_string(),
//!     };
//!     negotiated.respond(FormatResult::success(body))
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let layer = NegotiateLayer::new(Negotiator::default(), ["html", "json"]);
//!     let app = Router::new()
//!         .route("/concept", get(concept))
//!         .layer(from_fn(layer.middleware()));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await.unwrap();
//!     axum::serve(listener, app).await.unwrap();
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[protocol]** - Containers, keyword lookup, preference parsing and matching
//! - **[negotiate]** - Format table and negotiator
//! - **[server]** - HTTP server (Axum) integration
//! - **[translator]** - Translation gateway client
//! - **[error]** - Error types and result handling

pub mod error;
pub mod negotiate;
pub mod protocol;
pub mod server;
pub mod translator;

pub use error::{ConnegError, Result};
pub use negotiate::{FormatTable, Negotiator};
pub use server::{FormatResult, NegotiateLayer, NegotiatedFormat, ServerConfig};
pub use translator::{Gateway, TranslatorConfig};

#[cfg(test)]
mod tests;
