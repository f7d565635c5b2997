//! Quality-weighted preference lists (`Accept`, `Accept-Language`, ...).
//!
//! Parses a comma-separated header value into its tokens ordered by
//! descending `q` weight, per [RFC 2616 §14.1].
//!
//! | Input | Result |
//! |-------|--------|
//! | `text/html` | `["text/html"]` |
//! | `a;q=0.5, b, c;q=0.5` | `["b", "a", "c"]` |
//! | `a,,b,` | `["a", "b"]` |
//! | `a;q=high` | error |
//!
//! The weight separator is the literal `;q=`. Tokens keep any other
//! parameters (`text/html;level=1`) verbatim.
//!
//! [RFC 2616 §14.1]: https://www.rfc-editor.org/rfc/rfc2616#section-14.1

use crate::error::{ConnegError, Result};

const WEIGHT_SEPARATOR: &str = ";q=";
const DEFAULT_WEIGHT: f64 = 1.0;

/// Parse a preference header into tokens, most preferred first.
///
/// Entries without a weight count as `q=1.0`. Entries of equal weight keep
/// their left-to-right order from the header. Empty entries (a trailing or
/// doubled comma) never appear in the result.
///
/// # Errors
///
/// Returns [`ConnegError::HeaderParse`] if a weight is not a number.
///
/// # Examples
///
/// ```
/// use conneg_axum_http::protocol::parse_preferences;
///
/// let prefs = parse_preferences("da, en-gb;q=0.8, en;q=0.7").unwrap();
/// assert_eq!(prefs, vec!["da", "en-gb", "en"]);
///
/// let prefs = parse_preferences("text/*;q=0.3, text/html;q=0.7, */*;q=0.5").unwrap();
/// assert_eq!(prefs, vec!["text/html", "*/*", "text/*"]);
/// ```
pub fn parse_preferences(value: &str) -> Result<Vec<String>> {
    let mut weighted = value
        .split(',')
        .map(|entry| {
            let (token, weight) = match entry.split_once(WEIGHT_SEPARATOR) {
                Some((token, weight)) => (token, parse_weight(weight, entry)?),
                None => (entry, DEFAULT_WEIGHT),
            };
            Ok((token.trim(), weight))
        })
        .collect::<Result<Vec<(&str, f64)>>>()?;

    // Vec::sort_by is stable, which keeps equal weights in header order.
    weighted.sort_by(|a, b| b.1.total_cmp(&a.1));

    Ok(weighted
        .into_iter()
        .filter(|(token, _)| !token.is_empty())
        .map(|(token, _)| token.to_string())
        .collect())
}

/// Weights must be finite; `NaN` and `inf` parse as `f64` but have no place
/// in a preference order.
fn parse_weight(weight: &str, entry: &str) -> Result<f64> {
    weight
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|weight| weight.is_finite())
        .ok_or_else(|| {
            ConnegError::HeaderParse(format!(
                "Invalid quality value '{}' in '{}'",
                weight,
                entry.trim()
            ))
        })
}
