//! Ordered keyword lookup across several mapping sources.
//!
//! A value such as the `Accept` header may live in more than one place: an
//! explicit per-call override, the parsed request headers, a configuration
//! map. [`lookup`] searches an ordered list of such sources for the first of
//! several candidate keys.
//!
//! # Case folding
//!
//! With `ignore_case`, each source is viewed through a map whose keys are
//! lower-cased. When two keys of one source fold to the same name, the one
//! that comes later in the source's iteration order wins. This last-write-wins
//! rule is part of the contract, not an accident of map construction.
//!
//! # Examples
//!
//! ```
//! use conneg_axum_http::protocol::{lookup, lookup_value, KeywordSource};
//! use std::collections::HashMap;
//!
//! let overrides: HashMap<String, String> = HashMap::new();
//! let headers = vec![("Accept".to_string(), "application/json".to_string())];
//! let sources: [&dyn KeywordSource<String>; 2] = [&overrides, &headers];
//!
//! let accept = lookup_value("accept", &sources, true);
//! assert_eq!(accept.as_deref().map(String::as_str), Some("application/json"));
//!
//! let length = lookup(["Content-Length"], &sources, None, true, |v| v.map(|s| s.len()));
//! assert_eq!(length, None);
//! ```

use super::containers::{to_sequence, Nested};
use http::HeaderMap;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};

/// An ordered key → value mapping that [`lookup`] can search.
///
/// Entries are yielded in the source's natural iteration order; that order
/// decides which key wins when case folding makes two keys collide.
pub trait KeywordSource<V: ?Sized + ToOwned = str> {
    /// All entries of this source, in iteration order.
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, Cow<'_, V>)> + '_>;
}

impl<V: Clone> KeywordSource<V> for HashMap<String, V> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, Cow<'_, V>)> + '_> {
        Box::new(self.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v))))
    }
}

impl<V: Clone> KeywordSource<V> for BTreeMap<String, V> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, Cow<'_, V>)> + '_> {
        Box::new(self.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v))))
    }
}

impl<V: Clone> KeywordSource<V> for Vec<(String, V)> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, Cow<'_, V>)> + '_> {
        Box::new(self.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v))))
    }
}

impl KeywordSource<str> for HashMap<String, String> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> + '_> {
        Box::new(self.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v.as_str()))))
    }
}

impl KeywordSource<str> for Vec<(String, String)> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> + '_> {
        Box::new(self.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v.as_str()))))
    }
}

impl KeywordSource<str> for BTreeMap<String, String> {
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> + '_> {
        Box::new(self.iter().map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v.as_str()))))
    }
}

/// Request headers. Values that are not visible ASCII are skipped, and a
/// header sent several times is presented once, its values joined with `", "`.
impl KeywordSource<str> for HeaderMap {
    fn entries(&self) -> Box<dyn Iterator<Item = (Cow<'_, str>, Cow<'_, str>)> + '_> {
        Box::new(self.keys().filter_map(move |name| {
            let values: Vec<&str> = self
                .get_all(name)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .collect();
            match values.as_slice() {
                [] => None,
                [single] => Some((Cow::Borrowed(name.as_str()), Cow::Borrowed(*single))),
                _ => Some((Cow::Borrowed(name.as_str()), Cow::Owned(values.join(", ")))),
            }
        }))
    }
}

/// Find the first value for any of `keys` across `sources`.
///
/// Sources are searched in order; within a source, keys are tried in order,
/// and the first hit ends the search. The hit is passed to `transform` as
/// `Some(value)`. When nothing matches, `transform` receives `default`.
///
/// `keys` may be a single key or a list of keys; a bare string is one key.
pub fn lookup<'s, 'k, V, R, F>(
    keys: impl Into<Nested<&'k str>>,
    sources: &[&'s dyn KeywordSource<V>],
    default: Option<&'s V>,
    ignore_case: bool,
    transform: F,
) -> R
where
    V: ?Sized + ToOwned + 's,
    F: FnOnce(Option<Cow<'s, V>>) -> R,
{
    let keys: Vec<&str> = to_sequence(Some(keys.into()), None, 0)
        .iter()
        .filter_map(|key| key.as_item().copied())
        .collect();

    for &source in sources {
        let mut view: HashMap<Cow<'s, str>, Cow<'s, V>> = HashMap::new();
        for (key, value) in source.entries() {
            let key = if ignore_case {
                Cow::Owned(key.to_lowercase())
            } else {
                key
            };
            view.insert(key, value);
        }

        for key in &keys {
            let wanted = if ignore_case {
                Cow::Owned(key.to_lowercase())
            } else {
                Cow::Borrowed(*key)
            };
            if let Some(value) = view.remove(&*wanted) {
                return transform(Some(value));
            }
        }
    }

    transform(default.map(Cow::Borrowed))
}

/// [`lookup`] without a default or transform.
pub fn lookup_value<'s, 'k, V>(
    keys: impl Into<Nested<&'k str>>,
    sources: &[&'s dyn KeywordSource<V>],
    ignore_case: bool,
) -> Option<Cow<'s, V>>
where
    V: ?Sized + ToOwned + 's,
{
    lookup(keys, sources, None, ignore_case, |value| value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderValue;

    fn pairs(entries: &[(&str, &str)]) -> Vec<(String, String)> {
        entries
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_lookup_first_key_in_first_source() {
        let first = pairs(&[("referencelanguage", "en"), ("maxtoreturn", "10")]);
        let second = pairs(&[("Accept-Language", "da, en-gb;q=0.8, en;q=0.7")]);
        let sources: [&dyn KeywordSource<String>; 2] = [&first, &second];

        let value = lookup_value(
            ["lang", "referenceLanguage", "refLang", "Accept-Language"],
            &sources,
            true,
        );
        assert_eq!(value.as_deref().map(String::as_str), Some("en"));
    }

    #[test]
    fn test_lookup_source_order_dominates_key_order() {
        let first = pairs(&[("b", "from-first")]);
        let second = pairs(&[("a", "from-second")]);
        let sources: [&dyn KeywordSource<String>; 2] = [&first, &second];

        let value = lookup_value(["a", "b"], &sources, true);
        assert_eq!(value.as_deref().map(String::as_str), Some("from-first"));
    }

    #[test]
    fn test_lookup_case_sensitive_misses() {
        let source = pairs(&[("Accept", "text/html")]);
        let sources: [&dyn KeywordSource<String>; 1] = [&source];

        assert!(lookup_value("accept", &sources, false).is_none());
        assert!(lookup_value("Accept", &sources, false).is_some());
    }

    #[test]
    fn test_lookup_folding_collision_last_wins() {
        let source = pairs(&[("ACCEPT", "first"), ("accept", "second")]);
        let sources: [&dyn KeywordSource<String>; 1] = [&source];

        let value = lookup_value("Accept", &sources, true);
        assert_eq!(value.as_deref().map(String::as_str), Some("second"));
    }

    #[test]
    fn test_lookup_transform_applies_to_default() {
        let source: Vec<(String, String)> = Vec::new();
        let sources: [&dyn KeywordSource<String>; 1] = [&source];
        let fallback = "text/html".to_string();

        let length = lookup("Accept", &sources, Some(&fallback), true, |value| {
            value.map_or(0, |v| v.len())
        });
        assert_eq!(length, 9);
    }

    #[test]
    fn test_lookup_header_map_joins_repeated_values() {
        let mut headers = HeaderMap::new();
        headers.append("accept", HeaderValue::from_static("text/html"));
        headers.append("accept", HeaderValue::from_static("application/json;q=0.5"));
        let sources: [&dyn KeywordSource; 1] = [&headers];

        let value = lookup_value("Accept", &sources, true);
        assert_eq!(value.as_deref(), Some("text/html, application/json;q=0.5"));
    }

    #[test]
    fn test_lookup_overrides_layered_over_headers() {
        let mut overrides = HashMap::new();
        overrides.insert("Accept".to_string(), "text/turtle".to_string());
        let mut headers = HeaderMap::new();
        headers.insert("accept", HeaderValue::from_static("application/json"));
        let sources: [&dyn KeywordSource; 2] = [&overrides, &headers];

        let value = lookup_value("accept", &sources, true);
        assert_eq!(value.as_deref(), Some("text/turtle"));
    }
}
