//! Format negotiation over a static format table.
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`FormatTable`] | Immutable identifier ↔ MIME type mapping |
//! | [`Negotiator`] | Picks the response format for a request |
//!
//! # Examples
//!
//! ```
//! use conneg_axum_http::negotiate::{FormatTable, Negotiator};
//! use std::collections::HashMap;
//!
//! let negotiator = Negotiator::new(FormatTable::default());
//!
//! let mut request = HashMap::new();
//! request.insert("Accept".to_string(), "text/turtle, */*;q=0.1".to_string());
//! let format = negotiator.negotiate(&["json", "turtle"], &[&request]).unwrap();
//! assert_eq!(format, "turtle");
//! ```

mod negotiator;
mod table;

pub use negotiator::Negotiator;
pub use table::{FormatEntry, FormatTable, FormatTableBuilder};
