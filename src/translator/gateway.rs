//! Client for a remote translation REST API.
//!
//! The API takes an OAuth bearer token obtained with client credentials.
//! Tokens are cached until they expire. A `400 Bad Request` on the first
//! attempt is taken as a rejected token: the cache is cleared and the request
//! is sent once more with a fresh one.
//!
//! Successful responses are XML of the form
//! `<string xmlns="...">translated</string>`; the wrapper is removed unless
//! the caller asks for the raw XML.

use super::config::TranslatorConfig;
use crate::error::{ConnegError, Result};
use parking_lot::RwLock;
use regex::Regex;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

/// Namespace of the XML element wrapping translated text.
pub const SERIALIZATION_NAMESPACE: &str = "http://schemas.microsoft.com/2003/10/Serialization/";

static WRAPPER: OnceLock<Regex> = OnceLock::new();

fn wrapper() -> &'static Regex {
    WRAPPER.get_or_init(|| Regex::new(r"(?m)<string .*>(.*)</string>").expect("valid wrapper pattern"))
}

/// Remove the `<string>` wrapper around translated text.
#[must_use]
pub fn strip_wrapper(xml: &str) -> String {
    wrapper().replace_all(xml, "$1").into_owned()
}

/// Wrap `text` the way the API wraps its results.
#[must_use]
pub fn wrap(text: &str) -> String {
    format!("<string xmlns=\"{}\">{}</string>", SERIALIZATION_NAMESPACE, text)
}

#[derive(Clone, Debug)]
struct AccessToken {
    value: String,
    issued: Instant,
    lifetime: Duration,
}

impl AccessToken {
    fn new(value: impl Into<String>, lifetime: Duration) -> Self {
        Self {
            value: value.into(),
            issued: Instant::now(),
            lifetime,
        }
    }

    fn is_fresh(&self) -> bool {
        self.issued.elapsed() < self.lifetime
    }
}

/// Token endpoint reply. `expires_in` arrives as a number or a numeric string.
#[derive(Deserialize)]
struct TokenReply {
    access_token: String,
    expires_in: ExpiresIn,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ExpiresIn {
    Seconds(u64),
    Text(String),
}

impl ExpiresIn {
    fn seconds(&self) -> Result<u64> {
        match self {
            ExpiresIn::Seconds(seconds) => Ok(*seconds),
            ExpiresIn::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| ConnegError::Translation(format!("invalid expires_in: {}", text))),
        }
    }
}

/// Where a translation request stands with respect to its token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenAttempt {
    /// Using the cached token, or a freshly requested one.
    First,
    /// The first token was rejected and a new one was requested.
    Renewed,
}

impl TokenAttempt {
    /// The state after a rejected token, if another attempt is allowed.
    fn after_rejection(self) -> Option<Self> {
        match self {
            TokenAttempt::First => Some(TokenAttempt::Renewed),
            TokenAttempt::Renewed => None,
        }
    }
}

/// Translation API client with a cached access token.
///
/// # Examples
///
/// ```ignore
/// use conneg_axum_http::translator::{Gateway, TranslatorConfig};
///
/// let gateway = Gateway::new(TranslatorConfig::default().with_credentials("id", "secret"));
/// let english = gateway.translate("mal di testa", "it", "en", false).await?;
/// ```
#[derive(Debug)]
pub struct Gateway {
    client: reqwest::Client,
    config: Arc<TranslatorConfig>,
    token: RwLock<Option<AccessToken>>,
}

impl Gateway {
    /// Create a gateway from `config`.
    pub fn new(config: TranslatorConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .unwrap_or_default();

        Self {
            client,
            config: Arc::new(config),
            token: RwLock::new(None),
        }
    }

    /// The gateway's configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Translate between the configured default languages.
    ///
    /// # Errors
    ///
    /// See [`Gateway::translate`].
    pub async fn translate_default(&self, text: &str) -> Result<String> {
        self.translate(text, &self.config.from_language, &self.config.to_language, false)
            .await
    }

    /// Translate `text` from `from` to `to`.
    ///
    /// With `as_xml` the API's XML reply is returned untouched. If the API
    /// refuses the request, `text` itself is returned in the same shape.
    ///
    /// # Errors
    ///
    /// Returns [`ConnegError::Translation`] when no access token can be
    /// obtained and [`ConnegError::Http`] on transport failures.
    pub async fn translate(&self, text: &str, from: &str, to: &str, as_xml: bool) -> Result<String> {
        let mut attempt = TokenAttempt::First;
        loop {
            let token = self.access_token().await?;
            let response = self
                .client
                .get(&self.config.translate_url)
                .bearer_auth(&token)
                .query(&[("text", text), ("from", from), ("to", to)])
                .send()
                .await?;

            let status = response.status();
            if status.is_success() {
                let body = response.text().await?;
                return Ok(if as_xml { body } else { strip_wrapper(&body) });
            }

            if status == StatusCode::BAD_REQUEST {
                if let Some(next) = attempt.after_rejection() {
                    tracing::debug!("Translation token rejected, renewing");
                    self.invalidate();
                    attempt = next;
                    continue;
                }
            }

            tracing::warn!(%status, ?attempt, "Translation request failed");
            let wrapped = wrap(text);
            return Ok(if as_xml { wrapped } else { strip_wrapper(&wrapped) });
        }
    }

    /// Drop the cached token.
    pub fn invalidate(&self) {
        *self.token.write() = None;
    }

    async fn access_token(&self) -> Result<String> {
        let cached = self
            .token
            .read()
            .as_ref()
            .filter(|token| token.is_fresh())
            .map(|token| token.value.clone());
        if let Some(value) = cached {
            return Ok(value);
        }

        let token = self.renew_token().await?;
        let value = token.value.clone();
        *self.token.write() = Some(token);
        Ok(value)
    }

    async fn renew_token(&self) -> Result<AccessToken> {
        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("scope", self.config.scope.as_str()),
            ("grant_type", "client_credentials"),
        ];
        let response = self
            .client
            .post(&self.config.auth_url)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "Translation access token request failed");
            return Err(ConnegError::Translation(format!(
                "access token request failed with status {}",
                status
            )));
        }

        let reply: TokenReply = response.json().await?;
        let lifetime = Duration::from_secs(reply.expires_in.seconds()?);
        Ok(AccessToken::new(reply.access_token, lifetime))
    }
}
