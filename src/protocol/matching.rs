//! RFC 2616 §14.1 best-match selection.
//!
//! Given what the server can produce and what the client asked for (already
//! ordered by preference), pick the single server value that serves the
//! client best.
//!
//! Server values are matched in four tiers. Each tier only considers values
//! no earlier tier matched:
//!
//! | Tier | Rule | Example server value → client pattern |
//! |------|------|----------------------------------------|
//! | 0 | exact | `text/html` → `text/html` |
//! | 1 | parameters stripped at the first `;` | `text/html;level=1` → `text/html` |
//! | 2 | subtype replaced by `*` | `text/turtle` → `text/*` |
//! | 3 | `*/*`, first unmatched value only | `application/json` → `*/*` |
//!
//! Every match is ranked `(preference index, tier)`. The client's preference
//! order dominates; the tier only breaks ties between values matched through
//! the same preference.

use std::collections::HashMap;

const ANY_TYPE: &str = "*/*";

/// Match rank: position of the matched client preference, then tier.
type Rank = (usize, u8);

/// Select the server value that best satisfies `client_preferences`.
///
/// Returns `None` when no server value matches in any tier. When ranks tie,
/// the value matched first wins.
///
/// # Examples
///
/// ```
/// use conneg_axum_http::protocol::best_match;
///
/// let server = ["text/html", "text/*"];
/// assert_eq!(best_match(&server, &["text/html"]), Some("text/html"));
///
/// // `*/*` is handed to one server value only.
/// assert_eq!(best_match(&["a/b", "c/d"], &["*/*"]), Some("a/b"));
///
/// assert_eq!(best_match(&["application/json"], &["text/html"]), None);
/// ```
pub fn best_match<'a, S, C>(server_values: &'a [S], client_preferences: &[C]) -> Option<&'a str>
where
    S: AsRef<str>,
    C: AsRef<str>,
{
    // A preference listed twice ranks at its last position.
    let mut preference_rank: HashMap<&str, usize> = HashMap::with_capacity(client_preferences.len());
    for (index, preference) in client_preferences.iter().enumerate() {
        preference_rank.insert(preference.as_ref(), index);
    }

    let mut matches: Vec<(&'a str, Rank)> = Vec::new();
    let is_matched =
        |matches: &[(&str, Rank)], value: &str| matches.iter().any(|(matched, _)| *matched == value);

    for value in server_values.iter().map(AsRef::as_ref) {
        if let Some(&index) = preference_rank.get(value) {
            if !is_matched(&matches, value) {
                matches.push((value, (index, 0)));
            }
        }
    }

    for value in server_values.iter().map(AsRef::as_ref) {
        if is_matched(&matches, value) {
            continue;
        }
        if let Some((bare, _)) = value.split_once(';') {
            if let Some(&index) = preference_rank.get(bare) {
                matches.push((value, (index, 1)));
            }
        }
    }

    for value in server_values.iter().map(AsRef::as_ref) {
        if is_matched(&matches, value) {
            continue;
        }
        if let Some((main_type, _)) = value.split_once('/') {
            let pattern = format!("{}/*", main_type);
            if let Some(&index) = preference_rank.get(pattern.as_str()) {
                matches.push((value, (index, 2)));
            }
        }
    }

    if let Some(&index) = preference_rank.get(ANY_TYPE) {
        if let Some(value) = server_values
            .iter()
            .map(AsRef::as_ref)
            .find(|value| !is_matched(&matches, value))
        {
            matches.push((value, (index, 3)));
        }
    }

    matches
        .into_iter()
        .reduce(|best, candidate| if best.1 <= candidate.1 { best } else { candidate })
        .map(|(value, _)| value)
}
