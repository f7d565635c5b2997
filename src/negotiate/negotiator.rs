//! Format negotiation: from supported identifiers and an `Accept` header to
//! the one identifier to respond with.
//!
//! # Algorithm
//!
//! 1. Expand the supported identifiers into a candidate list of MIME types
//!    through the [`FormatTable`], keeping order and duplicates.
//! 2. Look `Accept` up in the header sources (defaulting to `text/html`) and
//!    parse it into a preference list.
//! 3. Pick the best candidate with [`best_match`].
//! 4. Report the first supported identifier, in table order, that lists the
//!    winner. Anything else falls back to `html`.

use super::table::FormatTable;
use crate::error::Result;
use crate::protocol::constants::{
    headers, DEFAULT_ACCEPT, FALLBACK_FORMAT, UNREGISTERED_FORMAT_TYPE,
};
use crate::protocol::{best_match, lookup, parse_preferences, KeywordSource, Nested};
use http::HeaderMap;
use std::sync::Arc;

/// Chooses response formats against a shared, immutable [`FormatTable`].
///
/// Cheap to clone; clones share the table.
///
/// # Examples
///
/// ```
/// use conneg_axum_http::Negotiator;
/// use http::{HeaderMap, HeaderValue};
///
/// let negotiator = Negotiator::default();
///
/// let mut headers = HeaderMap::new();
/// headers.insert("accept", HeaderValue::from_static("application/json"));
/// assert_eq!(negotiator.negotiate_headers(&["html", "json"], &headers).unwrap(), "json");
///
/// // No Accept header: the client is assumed to want HTML.
/// assert_eq!(negotiator.negotiate_headers(&["html", "json"], &HeaderMap::new()).unwrap(), "html");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Negotiator {
    table: Arc<FormatTable>,
}

impl Negotiator {
    /// Create a negotiator over `table`.
    #[must_use]
    pub fn new(table: FormatTable) -> Self {
        Self {
            table: Arc::new(table),
        }
    }

    /// Create a negotiator over an already shared table.
    #[must_use]
    pub fn with_shared_table(table: Arc<FormatTable>) -> Self {
        Self { table }
    }

    /// The table this negotiator reads.
    #[inline]
    #[must_use]
    pub fn table(&self) -> &FormatTable {
        &self.table
    }

    /// MIME types a resource supporting `supported` is willing to serve.
    ///
    /// Identifiers missing from the table contribute
    /// [`UNREGISTERED_FORMAT_TYPE`].
    #[must_use]
    pub fn candidates<S: AsRef<str>>(&self, supported: &[S]) -> Vec<String> {
        supported
            .iter()
            .flat_map(|id| {
                let id = id.as_ref();
                match self.table.types_of(id) {
                    Some(types) => types.to_vec(),
                    None => {
                        tracing::warn!(format = id, "Unregistered format identifier");
                        Nested::<String>::from(UNREGISTERED_FORMAT_TYPE).items()
                    }
                }
            })
            .collect()
    }

    /// Pick the format to respond with.
    ///
    /// `sources` are searched in order for an `Accept` value, so explicit
    /// overrides placed before the request headers take precedence.
    ///
    /// The result is one of `supported` or [`FALLBACK_FORMAT`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::ConnegError::HeaderParse`] if the `Accept` value has
    /// a non-numeric `q` weight.
    pub fn negotiate<'n, S: AsRef<str>>(
        &'n self,
        supported: &[S],
        sources: &[&dyn KeywordSource],
    ) -> Result<&'n str> {
        let candidates = self.candidates(supported);
        let preferences = lookup(
            headers::ACCEPT_KEY,
            sources,
            Some(DEFAULT_ACCEPT),
            true,
            |accept| accept.map_or_else(|| Ok(Vec::new()), |value| parse_preferences(&value)),
        )?;

        let winner = best_match(&candidates, &preferences);
        let format = winner
            .and_then(|mime_type| self.table.owner_among(mime_type, supported))
            .unwrap_or(FALLBACK_FORMAT);

        tracing::debug!(
            ?preferences,
            ?winner,
            format,
            "Negotiated response format"
        );
        Ok(format)
    }

    /// [`Negotiator::negotiate`] against request headers alone.
    ///
    /// # Errors
    ///
    /// See [`Negotiator::negotiate`].
    pub fn negotiate_headers<'n, S: AsRef<str>>(
        &'n self,
        supported: &[S],
        headers: &HeaderMap,
    ) -> Result<&'n str> {
        self.negotiate(supported, &[headers])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConnegError;
    use http::HeaderValue;
    use std::collections::HashMap;

    fn accept(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(headers::ACCEPT, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_candidates_expand_in_order() {
        let negotiator = Negotiator::default();
        assert_eq!(
            negotiator.candidates(&["json", "html"]),
            vec!["application/json", "text/html", "application/xhtml+xml"]
        );
    }

    #[test]
    fn test_candidates_unknown_format() {
        let negotiator = Negotiator::default();
        assert_eq!(negotiator.candidates(&["rdfa"]), vec![UNREGISTERED_FORMAT_TYPE]);
    }

    #[test]
    fn test_negotiate_json() {
        let negotiator = Negotiator::default();
        let format = negotiator
            .negotiate_headers(&["html", "json"], &accept("application/json"))
            .unwrap();
        assert_eq!(format, "json");
    }

    #[test]
    fn test_negotiate_without_accept_defaults_to_html() {
        let negotiator = Negotiator::default();
        let format = negotiator
            .negotiate_headers(&["html", "json"], &HeaderMap::new())
            .unwrap();
        assert_eq!(format, "html");
    }

    #[test]
    fn test_negotiate_quality_order() {
        let negotiator = Negotiator::default();
        let headers = accept("text/html;q=0.5, text/turtle, application/json;q=0.9");
        let format = negotiator
            .negotiate_headers(&["html", "json", "turtle"], &headers)
            .unwrap();
        assert_eq!(format, "turtle");
    }

    #[test]
    fn test_negotiate_no_match_falls_back() {
        let negotiator = Negotiator::default();
        let format = negotiator
            .negotiate_headers(&["json"], &accept("image/png"))
            .unwrap();
        assert_eq!(format, FALLBACK_FORMAT);
    }

    #[test]
    fn test_negotiate_empty_supported_falls_back() {
        let negotiator = Negotiator::default();
        let supported: [&str; 0] = [];
        let format = negotiator
            .negotiate_headers(&supported, &accept("*/*"))
            .unwrap();
        assert_eq!(format, FALLBACK_FORMAT);
    }

    #[test]
    fn test_negotiate_wildcard_picks_first_supported() {
        let negotiator = Negotiator::default();
        let format = negotiator
            .negotiate_headers(&["turtle", "json"], &accept("*/*"))
            .unwrap();
        assert_eq!(format, "turtle");
    }

    #[test]
    fn test_negotiate_unknown_format_through_wildcard_falls_back() {
        let negotiator = Negotiator::default();
        let format = negotiator
            .negotiate_headers(&["rdfa"], &accept("*/*"))
            .unwrap();
        assert_eq!(format, FALLBACK_FORMAT);
    }

    #[test]
    fn test_negotiate_alias_reports_supported_identifier() {
        let negotiator = Negotiator::default();
        let format = negotiator
            .negotiate_headers(&["pretty-xml"], &accept("application/rdf+xml"))
            .unwrap();
        assert_eq!(format, "pretty-xml");
    }

    #[test]
    fn test_negotiate_override_source_first() {
        let negotiator = Negotiator::default();
        let mut overrides = HashMap::new();
        overrides.insert("accept".to_string(), "text/turtle".to_string());
        let headers = accept("application/json");

        let format = negotiator
            .negotiate(&["json", "turtle"], &[&overrides, &headers])
            .unwrap();
        assert_eq!(format, "turtle");
    }

    #[test]
    fn test_negotiate_malformed_weight_is_error() {
        let negotiator = Negotiator::default();
        let result = negotiator.negotiate_headers(&["json"], &accept("application/json;q=x"));
        assert!(matches!(result, Err(ConnegError::HeaderParse(_))));
    }

    #[test]
    fn test_negotiate_custom_table() {
        let table = FormatTable::builder()
            .format("csv", ["text/csv", "application/csv"])
            .format("json", "application/json")
            .build()
            .unwrap();
        let negotiator = Negotiator::new(table);
        let format = negotiator
            .negotiate_headers(&["json", "csv"], &accept("application/csv, application/json"))
            .unwrap();
        // Both are preferred equally; the header order decides.
        assert_eq!(format, "csv");
    }
}
