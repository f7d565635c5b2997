//! Scalar-or-sequence values and the helpers that normalize them.
//!
//! Format tables, lookup keys and similar inputs may be written either as a
//! single value or as a list of values. [`Nested`] captures both shapes, and
//! the free functions here turn them into ordered vectors.
//!
//! A string is always an [`Nested::Item`]; it is never treated as a sequence
//! of characters.
//!
//! # Examples
//!
//! ```
//! use conneg_axum_http::protocol::{to_sequence, Nested};
//!
//! let keys = to_sequence(Some(Nested::Item("Accept")), None, 0);
//! assert_eq!(keys, vec![Nested::Item("Accept")]);
//!
//! let padded = to_sequence(None, Some(Nested::Item("x")), 2);
//! assert_eq!(padded, vec![Nested::Item("x"), Nested::Item("x")]);
//! ```

use serde::{Deserialize, Serialize};

/// A single value or an ordered sequence of (possibly nested) values.
///
/// Deserializes untagged, so `"text/plain"` and `["text/html", "application/xhtml+xml"]`
/// are both accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    /// A scalar value.
    Item(T),
    /// An ordered sequence.
    Seq(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// True for [`Nested::Seq`], false for any item.
    #[inline]
    #[must_use]
    pub fn is_sequence(&self) -> bool {
        matches!(self, Nested::Seq(_))
    }

    /// Borrow the scalar, if this is an item.
    #[inline]
    #[must_use]
    pub fn as_item(&self) -> Option<&T> {
        match self {
            Nested::Item(value) => Some(value),
            Nested::Seq(_) => None,
        }
    }

    fn is_empty_sequence(&self) -> bool {
        matches!(self, Nested::Seq(items) if items.is_empty())
    }
}

impl<T: Clone> Nested<T> {
    /// Flatten one level of nesting.
    ///
    /// Items are returned unchanged. In a sequence, every nested sequence
    /// contributes its direct members and every item contributes itself;
    /// anything nested deeper stays as it is.
    ///
    /// ```
    /// use conneg_axum_http::protocol::Nested::{Item, Seq};
    ///
    /// let value = Seq(vec![Seq(vec![Item(1), Item(2)]), Seq(vec![Item(3), Seq(vec![Item(4)])])]);
    /// assert_eq!(
    ///     value.flatten_one_level(),
    ///     Seq(vec![Item(1), Item(2), Item(3), Seq(vec![Item(4)])])
    /// );
    /// ```
    #[must_use]
    pub fn flatten_one_level(&self) -> Nested<T> {
        match self {
            Nested::Item(_) => self.clone(),
            Nested::Seq(entries) => Nested::Seq(
                entries
                    .iter()
                    .flat_map(|entry| match entry {
                        Nested::Seq(inner) => inner.clone(),
                        Nested::Item(_) => vec![entry.clone()],
                    })
                    .collect(),
            ),
        }
    }

    /// Scalars reachable after one level of flattening, in order.
    ///
    /// Anything still nested after flattening is skipped.
    #[must_use]
    pub fn items(&self) -> Vec<T> {
        to_sequence(Some(self.flatten_one_level()), None, 0)
            .into_iter()
            .filter_map(|entry| match entry {
                Nested::Item(value) => Some(value),
                Nested::Seq(_) => None,
            })
            .collect()
    }
}

impl<'a> From<&'a str> for Nested<&'a str> {
    fn from(value: &'a str) -> Self {
        Nested::Item(value)
    }
}

impl From<&str> for Nested<String> {
    fn from(value: &str) -> Self {
        Nested::Item(value.to_string())
    }
}

impl From<String> for Nested<String> {
    fn from(value: String) -> Self {
        Nested::Item(value)
    }
}

impl<T> From<Vec<T>> for Nested<T> {
    fn from(values: Vec<T>) -> Self {
        Nested::Seq(values.into_iter().map(Nested::Item).collect())
    }
}

impl<T: Clone> From<&[T]> for Nested<T> {
    fn from(values: &[T]) -> Self {
        Nested::Seq(values.iter().cloned().map(Nested::Item).collect())
    }
}

impl<T, const N: usize> From<[T; N]> for Nested<T> {
    fn from(values: [T; N]) -> Self {
        Nested::Seq(values.into_iter().map(Nested::Item).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Nested<String> {
    fn from(values: [&str; N]) -> Self {
        Nested::Seq(values.iter().map(|v| Nested::Item((*v).to_string())).collect())
    }
}

impl From<&[&str]> for Nested<String> {
    fn from(values: &[&str]) -> Self {
        Nested::Seq(values.iter().map(|v| Nested::Item((*v).to_string())).collect())
    }
}

/// Whether `value` is a sequence. Strings never are.
#[inline]
#[must_use]
pub fn is_sequence<T>(value: &Nested<T>) -> bool {
    value.is_sequence()
}

/// Normalize `item` into an ordered vector.
///
/// An absent item or an empty sequence is replaced by `default`. A scalar is
/// wrapped in a one-element vector, even an empty string. The result is then
/// right-padded with `default` until it holds at least `min_len` entries;
/// without a default there is nothing to pad with and the result is returned
/// as is.
#[must_use]
pub fn to_sequence<T: Clone>(
    item: Option<Nested<T>>,
    default: Option<Nested<T>>,
    min_len: usize,
) -> Vec<Nested<T>> {
    let item = match item {
        Some(value) if !value.is_empty_sequence() => Some(value),
        _ => default.clone(),
    };

    let mut sequence = match item {
        None => Vec::new(),
        Some(Nested::Seq(entries)) => entries,
        Some(value @ Nested::Item(_)) => vec![value],
    };

    if let Some(pad) = default {
        while sequence.len() < min_len {
            sequence.push(pad.clone());
        }
    }
    sequence
}

/// Flatten an optional value by one level. Absent stays absent.
#[inline]
#[must_use]
pub fn flatten_one_level<T: Clone>(value: Option<&Nested<T>>) -> Option<Nested<T>> {
    value.map(Nested::flatten_one_level)
}
