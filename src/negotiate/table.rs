//! The format mapping table.
//!
//! Maps abstract format identifiers (`"json"`, `"turtle"`, ...) to the MIME
//! types they may be served as. A table is built once, before the first
//! request, and never mutated; share it behind an `Arc`.
//!
//! # Default Table
//!
//! | Identifier | MIME types |
//! |------------|------------|
//! | `txt` | `text/plain` |
//! | `html`, `htm` | `text/html`, `application/xhtml+xml` |
//! | `xhtml` | `application/xhtml+xml`, `text/xml`, `application/xml` |
//! | `xml`, `pretty-xml` | `text/xml`, `application/xml`, `application/rdf+xml` |
//! | `json` | `application/json` |
//! | `trix` | `application/trix` |
//! | `n3` | `application/n-triples` |
//! | `nquads` | `application/n-quads` |
//! | `turtle` | `text/turtle` |
//! | `nt` | `application/nt-triples` |
//!
//! # Examples
//!
//! ```
//! use conneg_axum_http::FormatTable;
//!
//! let table = FormatTable::builder()
//!     .format("json", "application/json")
//!     .format("html", ["text/html", "application/xhtml+xml"])
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(table.types_of("html"), Some(&["text/html".to_string(), "application/xhtml+xml".to_string()][..]));
//! assert_eq!(table.owner_of("application/json"), Some("json"));
//! ```

use crate::error::{ConnegError, Result};
use crate::protocol::Nested;
use serde::Deserialize;
use std::collections::HashMap;

/// One row of a [`FormatTable`] as written in configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct FormatEntry {
    /// Format identifier.
    pub id: String,
    /// One MIME type or a list of them.
    pub types: Nested<String>,
}

/// Immutable, insertion-ordered mapping from format identifier to MIME types.
///
/// Queryable in both directions: [`FormatTable::types_of`] for building
/// candidate sets and [`FormatTable::owner_of`] for reporting a winner.
#[derive(Debug, Clone)]
pub struct FormatTable {
    /// Rows in insertion order, types already flattened.
    entries: Vec<(String, Vec<String>)>,
    /// Identifier → row index.
    by_id: HashMap<String, usize>,
    /// MIME type → row index of its first owner.
    by_type: HashMap<String, usize>,
}

impl FormatTable {
    /// Start building a table.
    #[must_use]
    pub fn builder() -> FormatTableBuilder {
        FormatTableBuilder::default()
    }

    /// Build a table from a JSON array of `{"id": ..., "types": ...}` rows.
    ///
    /// ```
    /// use conneg_axum_http::FormatTable;
    ///
    /// let table = FormatTable::from_json(r#"[
    ///     {"id": "json", "types": "application/json"},
    ///     {"id": "xml", "types": ["text/xml", "application/xml"]}
    /// ]"#).unwrap();
    /// assert_eq!(table.owner_of("application/xml"), Some("xml"));
    /// ```
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or on a duplicated identifier.
    pub fn from_json(json: &str) -> Result<Self> {
        let rows: Vec<FormatEntry> = serde_json::from_str(json)?;
        rows.into_iter()
            .fold(Self::builder(), |builder, row| builder.format(row.id, row.types))
            .build()
    }

    /// MIME types registered for `id`, in table order.
    #[must_use]
    pub fn types_of(&self, id: &str) -> Option<&[String]> {
        self.by_id.get(id).map(|&index| self.entries[index].1.as_slice())
    }

    /// The first (primary) MIME type registered for `id`.
    #[must_use]
    pub fn primary_type(&self, id: &str) -> Option<&str> {
        self.types_of(id)
            .and_then(|types| types.first())
            .map(String::as_str)
    }

    /// The first identifier, in table order, that lists `mime_type`.
    #[must_use]
    pub fn owner_of(&self, mime_type: &str) -> Option<&str> {
        self.by_type
            .get(mime_type)
            .map(|&index| self.entries[index].0.as_str())
    }

    /// The first identifier, in table order, that is one of `candidates`
    /// and lists `mime_type`.
    #[must_use]
    pub fn owner_among<S: AsRef<str>>(&self, mime_type: &str, candidates: &[S]) -> Option<&str> {
        self.entries
            .iter()
            .filter(|(id, _)| candidates.iter().any(|c| c.as_ref() == id))
            .find(|(_, types)| types.iter().any(|t| t == mime_type))
            .map(|(id, _)| id.as_str())
    }

    /// Whether `id` is registered.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Registered identifiers in table order.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// Number of registered identifiers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no identifier is registered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FormatTable {
    fn default() -> Self {
        let builder = Self::builder()
            .format("txt", "text/plain")
            .format("html", ["text/html", "application/xhtml+xml"])
            .format("htm", ["text/html", "application/xhtml+xml"])
            .format("xhtml", ["application/xhtml+xml", "text/xml", "application/xml"])
            .format("xml", ["text/xml", "application/xml", "application/rdf+xml"])
            .format("pretty-xml", ["text/xml", "application/xml", "application/rdf+xml"])
            .format("json", "application/json")
            .format("trix", "application/trix")
            .format("n3", "application/n-triples")
            .format("nquads", "application/n-quads")
            .format("turtle", ["text/turtle"])
            .format("nt", "application/nt-triples");

        // Identifiers above are distinct, so building cannot fail.
        let (entries, by_id, by_type) = builder.into_parts();
        Self {
            entries,
            by_id,
            by_type,
        }
    }
}

/// Builder for [`FormatTable`].
#[derive(Debug, Default)]
pub struct FormatTableBuilder {
    rows: Vec<(String, Nested<String>)>,
}

impl FormatTableBuilder {
    /// Register `id` with one MIME type or a list of them.
    #[must_use]
    pub fn format(mut self, id: impl Into<String>, types: impl Into<Nested<String>>) -> Self {
        self.rows.push((id.into(), types.into()));
        self
    }

    /// Freeze the table.
    ///
    /// # Errors
    ///
    /// Returns [`ConnegError::Config`] if an identifier is registered twice.
    pub fn build(self) -> Result<FormatTable> {
        let mut seen = std::collections::HashSet::new();
        for (id, _) in &self.rows {
            if !seen.insert(id.as_str()) {
                return Err(ConnegError::Config(format!(
                    "format '{}' registered more than once",
                    id
                )));
            }
        }

        let (entries, by_id, by_type) = self.into_parts();
        Ok(FormatTable {
            entries,
            by_id,
            by_type,
        })
    }

    #[allow(clippy::type_complexity)]
    fn into_parts(
        self,
    ) -> (
        Vec<(String, Vec<String>)>,
        HashMap<String, usize>,
        HashMap<String, usize>,
    ) {
        let mut entries = Vec::with_capacity(self.rows.len());
        let mut by_id = HashMap::with_capacity(self.rows.len());
        let mut by_type = HashMap::new();

        for (index, (id, types)) in self.rows.into_iter().enumerate() {
            let types = types.items();
            for mime_type in &types {
                by_type.entry(mime_type.clone()).or_insert(index);
            }
            by_id.entry(id.clone()).or_insert(index);
            entries.push((id, types));
        }

        (entries, by_id, by_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_order() {
        let table = FormatTable::default();
        let ids: Vec<&str> = table.ids().collect();
        assert_eq!(ids[..3], ["txt", "html", "htm"]);
        assert_eq!(table.len(), 12);
    }

    #[test]
    fn test_types_of_scalar_entry() {
        let table = FormatTable::default();
        assert_eq!(table.types_of("json"), Some(&["application/json".to_string()][..]));
        assert_eq!(table.types_of("unknown"), None);
    }

    #[test]
    fn test_primary_type() {
        let table = FormatTable::default();
        assert_eq!(table.primary_type("xhtml"), Some("application/xhtml+xml"));
        assert_eq!(table.primary_type("turtle"), Some("text/turtle"));
        assert_eq!(table.primary_type("rdf"), None);
    }

    #[test]
    fn test_owner_of_is_first_in_table_order() {
        let table = FormatTable::default();
        assert_eq!(table.owner_of("text/html"), Some("html"));
        assert_eq!(table.owner_of("text/xml"), Some("xhtml"));
        assert_eq!(table.owner_of("txt/plain"), None);
    }

    #[test]
    fn test_owner_among_restricts_to_candidates() {
        let table = FormatTable::default();
        assert_eq!(table.owner_among("text/xml", &["pretty-xml", "xml"]), Some("xml"));
        assert_eq!(table.owner_among("text/html", &["htm"]), Some("htm"));
        assert_eq!(table.owner_among("text/html", &["json"]), None);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let result = FormatTable::builder()
            .format("json", "application/json")
            .format("json", "text/json")
            .build();
        assert!(matches!(result, Err(ConnegError::Config(_))));
    }

    #[test]
    fn test_from_json_keeps_order() {
        let table = FormatTable::from_json(
            r#"[{"id": "b", "types": "x/b"}, {"id": "a", "types": ["x/a", "x/b"]}]"#,
        )
        .unwrap();
        let ids: Vec<&str> = table.ids().collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(table.owner_of("x/b"), Some("b"));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(FormatTable::from_json("{"), Err(ConnegError::Json(_))));
    }
}
