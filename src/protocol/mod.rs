//! Negotiation primitives: value normalization, keyword lookup, preference
//! parsing and RFC 2616 best-match selection.
//!
//! These are the building blocks of [`crate::negotiate::Negotiator`]. Each
//! is a pure function over its inputs and can be used on its own.
//!
//! # Examples
//!
//! ```
//! use conneg_axum_http::protocol::{best_match, parse_preferences};
//!
//! let prefs = parse_preferences("application/json;q=0.9, text/*").unwrap();
//! let served = ["application/json", "text/turtle"];
//! assert_eq!(best_match(&served, &prefs), Some("text/turtle"));
//! ```

pub mod constants;
pub mod containers;
pub mod lookup;
pub mod matching;
pub mod preference;

pub use containers::{flatten_one_level, is_sequence, to_sequence, Nested};
pub use lookup::{lookup, lookup_value, KeywordSource};
pub use matching::best_match;
pub use preference::parse_preferences;
