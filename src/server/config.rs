//! Server configuration for the negotiation layer.
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `charset` | `UTF-8` | Charset appended to formatted responses |
//! | `format_param` | `format` | Query parameter that overrides negotiation |
//! | `malformed_accept` | `Reject` | What to do with an unparseable `Accept` header |
//! | `content_types` | empty | Per-format response content type overrides |
//! | `href` | empty host/root | Public address used to build links |
//!
//! # Examples
//!
//! ```
//! use conneg_axum_http::server::{MalformedAccept, ServerConfig};
//!
//! let config = ServerConfig {
//!     malformed_accept: MalformedAccept::Ignore,
//!     ..Default::default()
//! };
//! assert_eq!(config.charset, "UTF-8");
//!
//! let config = ServerConfig::from_json(r#"{"href": {"host": "http://localhost:8080", "root": "/api"}}"#).unwrap();
//! assert_eq!(config.href.base_uri(), "http://localhost:8080/api");
//! ```

use super::href::HrefSettings;
use crate::error::Result;
use crate::protocol::constants::{DEFAULT_CHARSET, FORMAT_PARAM};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Handling of `Accept` headers that fail to parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedAccept {
    /// Answer `400 Bad Request`.
    #[default]
    Reject,
    /// Negotiate as if the request carried no `Accept` header.
    Ignore,
}

/// Configuration for [`super::NegotiateLayer`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Charset appended to the `Content-Type` of formatted responses.
    pub charset: String,

    /// Query parameter whose non-empty value is used as the format verbatim.
    pub format_param: String,

    /// Policy for unparseable `Accept` headers.
    pub malformed_accept: MalformedAccept,

    /// Response content type per format, replacing the format's primary
    /// MIME type (e.g. serving `json` as `application/rdf+xml` to browsers).
    pub content_types: BTreeMap<String, String>,

    /// Public address of the service.
    pub href: HrefSettings,
}

impl ServerConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConnegError::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            charset: DEFAULT_CHARSET.to_string(),
            format_param: FORMAT_PARAM.to_string(),
            malformed_accept: MalformedAccept::default(),
            content_types: BTreeMap::new(),
            href: HrefSettings::default(),
        }
    }
}
