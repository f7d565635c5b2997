//! Translation gateway configuration.
//!
//! # Configuration Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `auth_url` | DataMarket OAuth endpoint | Where access tokens are requested |
//! | `translate_url` | Translator `Translate` endpoint | Where text is translated |
//! | `client_id` | empty | OAuth client id |
//! | `client_secret` | empty | OAuth client secret |
//! | `scope` | `http://api.microsofttranslator.com` | OAuth scope |
//! | `from_language` | `it` | Default source language |
//! | `to_language` | `en` | Default target language |
//! | `request_timeout_ms` | 30000 | Timeout for each HTTP request |

use crate::error::Result;
use serde::Deserialize;

/// Default OAuth token endpoint.
pub const DEFAULT_AUTH_URL: &str = "https://datamarket.accesscontrol.windows.net/v2/OAuth2-13";

/// Default translation endpoint.
pub const DEFAULT_TRANSLATE_URL: &str = "http://api.microsofttranslator.com/v2/Http.svc/Translate";

/// Default OAuth scope.
pub const DEFAULT_SCOPE: &str = "http://api.microsofttranslator.com";

/// Configuration for [`super::Gateway`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// OAuth token endpoint.
    pub auth_url: String,
    /// Translation endpoint.
    pub translate_url: String,
    /// OAuth client id.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: String,
    /// OAuth scope.
    pub scope: String,
    /// Source language used by [`super::Gateway::translate_default`].
    pub from_language: String,
    /// Target language used by [`super::Gateway::translate_default`].
    pub to_language: String,
    /// Timeout for each request in milliseconds.
    pub request_timeout_ms: u64,
}

impl TranslatorConfig {
    /// Parse a configuration from JSON; missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConnegError::Json`] on malformed input.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Set the client credentials.
    #[must_use]
    pub fn with_credentials(
        mut self,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        self.client_id = client_id.into();
        self.client_secret = client_secret.into();
        self
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            translate_url: DEFAULT_TRANSLATE_URL.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            scope: DEFAULT_SCOPE.to_string(),
            from_language: "it".to_string(),
            to_language: "en".to_string(),
            request_timeout_ms: 30000,
        }
    }
}
