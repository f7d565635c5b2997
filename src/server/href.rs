//! Link construction relative to the service's public address.
//!
//! A service behind a proxy only knows its public address from
//! configuration. [`HrefSettings`] holds that address and builds absolute
//! and relative URIs from it; the free functions edit query strings.
//!
//! Query parameters are grouped by name in order of first appearance, so
//! `a=1&b=2&a=3` is rewritten as `a=1&a=3&b=2`.
//!
//! # Examples
//!
//! ```
//! use conneg_axum_http::server::href::{append_params, strip_control_params, HrefSettings};
//!
//! let href = HrefSettings::new("http://example.org", "/terms");
//! assert_eq!(href.relative_uri("/lookup"), "/terms/lookup");
//!
//! let uri = href.complete_uri("/lookup", Some("q=aspirin&password=secret")).unwrap();
//! assert_eq!(uri, "http://example.org/terms/lookup?q=aspirin");
//!
//! let uri = append_params(&uri, [("page", "2")]).unwrap();
//! assert_eq!(uri, "http://example.org/terms/lookup?q=aspirin&page=2");
//! ```

use crate::error::Result;
use crate::protocol::{to_sequence, Nested};
use axum::response::Redirect;
use serde::Deserialize;
use url::Url;

/// Query parameters that must never be forwarded in generated links.
pub const CONTROL_PARAMS: [&str; 3] = ["bypass", "user", "password"];

/// Public address of the service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HrefSettings {
    /// Scheme and authority, e.g. `http://example.org:8080`.
    pub host: String,
    /// Path prefix the service is mounted under, e.g. `/terms`.
    pub root: String,
}

impl HrefSettings {
    /// Create settings from host and root.
    pub fn new(host: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            root: root.into(),
        }
    }

    /// Root of the service, without any request path.
    #[must_use]
    pub fn base_uri(&self) -> String {
        format!("{}{}", self.host, self.root)
    }

    /// Absolute URI of `path` under the service, without a query.
    #[must_use]
    pub fn complete_uri_sans_params(&self, path: &str) -> String {
        format!("{}{}", self.base_uri(), path)
    }

    /// Absolute URI of a request, with control parameters stripped.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConnegError::Url`] if the result is not a valid URL.
    pub fn complete_uri(&self, path: &str, query: Option<&str>) -> Result<String> {
        let uri = match query {
            Some(query) if !query.is_empty() => {
                format!("{}?{}", self.complete_uri_sans_params(path), query)
            }
            _ => self.complete_uri_sans_params(path),
        };
        strip_control_params(&uri)
    }

    /// Path of `path` under the service root.
    #[must_use]
    pub fn relative_uri(&self, path: &str) -> String {
        format!("{}{}", self.root, path)
    }

    /// Redirect the client to `relative` under the service root.
    #[must_use]
    pub fn redirect(&self, relative: &str) -> Redirect {
        Redirect::to(&format!("{}/{}", self.base_uri(), relative))
    }
}

/// Remove [`CONTROL_PARAMS`] and any user credentials from `uri`.
///
/// # Errors
///
/// Returns [`crate::ConnegError::Url`] if `uri` is not an absolute URL.
pub fn strip_control_params(uri: &str) -> Result<String> {
    let mut url = Url::parse(uri)?;
    let params: Vec<(String, Vec<String>)> = query_params(&url)
        .into_iter()
        .filter(|(key, _)| !CONTROL_PARAMS.contains(&key.as_str()))
        .collect();
    write_query(&mut url, &params);

    // Only URLs that cannot be a base reject these, and they carry no credentials.
    let _ = url.set_username("");
    let _ = url.set_password(None);
    Ok(url.into())
}

/// Set query parameters on `uri`, replacing existing values of the same name.
///
/// Each value may be a single string or a list of strings.
///
/// # Errors
///
/// Returns [`crate::ConnegError::Url`] if `uri` is not an absolute URL.
pub fn append_params<K, V>(uri: &str, params: impl IntoIterator<Item = (K, V)>) -> Result<String>
where
    K: Into<String>,
    V: Into<Nested<String>>,
{
    let mut url = Url::parse(uri)?;
    let mut existing = query_params(&url);
    for (key, values) in params {
        let key = key.into();
        let values = values.into().items();
        match existing.iter_mut().find(|(k, _)| *k == key) {
            Some((_, current)) => *current = values,
            None => existing.push((key, values)),
        }
    }
    write_query(&mut url, &existing);
    Ok(url.into())
}

/// Remove one parameter or a list of parameters from `uri`.
///
/// # Errors
///
/// Returns [`crate::ConnegError::Url`] if `uri` is not an absolute URL.
pub fn remove_params<'k>(uri: &str, keys: impl Into<Nested<&'k str>>) -> Result<String> {
    let keys: Vec<&str> = to_sequence(Some(keys.into()), None, 0)
        .iter()
        .filter_map(|key| key.as_item().copied())
        .collect();

    let mut url = Url::parse(uri)?;
    let params: Vec<(String, Vec<String>)> = query_params(&url)
        .into_iter()
        .filter(|(key, _)| !keys.contains(&key.as_str()))
        .collect();
    write_query(&mut url, &params);
    Ok(url.into())
}

fn query_params(url: &Url) -> Vec<(String, Vec<String>)> {
    let mut params: Vec<(String, Vec<String>)> = Vec::new();
    for (key, value) in url.query_pairs() {
        match params.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value.into_owned()),
            None => params.push((key.into_owned(), vec![value.into_owned()])),
        }
    }
    params
}

fn write_query(url: &mut Url, params: &[(String, Vec<String>)]) {
    if params.is_empty() {
        url.set_query(None);
        return;
    }
    url.query_pairs_mut().clear().extend_pairs(
        params
            .iter()
            .flat_map(|(key, values)| values.iter().map(move |value| (key, value))),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;
    use http::{header, StatusCode};

    fn settings() -> HrefSettings {
        HrefSettings::new("http://example.org", "/terms")
    }

    #[test]
    fn test_base_and_relative_uri() {
        let href = settings();
        assert_eq!(href.base_uri(), "http://example.org/terms");
        assert_eq!(href.complete_uri_sans_params("/a/b"), "http://example.org/terms/a/b");
        assert_eq!(href.relative_uri("/a/b"), "/terms/a/b");
    }

    #[test]
    fn test_complete_uri_without_query() {
        let uri = settings().complete_uri("/a", None).unwrap();
        assert_eq!(uri, "http://example.org/terms/a");
    }

    #[test]
    fn test_strip_control_params_and_credentials() {
        let uri = strip_control_params("http://bob:pw@example.org/x?user=bob&q=1&bypass=1").unwrap();
        assert_eq!(uri, "http://example.org/x?q=1");
    }

    #[test]
    fn test_strip_control_params_drops_empty_query() {
        let uri = strip_control_params("http://example.org/x?password=pw").unwrap();
        assert_eq!(uri, "http://example.org/x");
    }

    #[test]
    fn test_strip_control_params_relative_is_error() {
        assert!(strip_control_params("/x?user=bob").is_err());
    }

    #[test]
    fn test_append_params_replaces_existing() {
        let uri = append_params("http://example.org/x?a=1&b=2&a=3", [("a", "9")]).unwrap();
        assert_eq!(uri, "http://example.org/x?a=9&b=2");
    }

    #[test]
    fn test_append_params_list_values() {
        let uri = append_params("http://example.org/x", [("tag", ["a b", "c"])]).unwrap();
        assert_eq!(uri, "http://example.org/x?tag=a+b&tag=c");
    }

    #[test]
    fn test_remove_params_single_and_list() {
        let uri = remove_params("http://example.org/x?a=1&b=2&c=3", "b").unwrap();
        assert_eq!(uri, "http://example.org/x?a=1&c=3");

        let uri = remove_params("http://example.org/x?a=1&b=2&c=3", ["a", "c"]).unwrap();
        assert_eq!(uri, "http://example.org/x?b=2");
    }

    #[test]
    fn test_redirect_under_root() {
        let response = settings().redirect("login").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "http://example.org/terms/login"
        );
    }
}
