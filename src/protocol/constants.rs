//! Protocol constants shared by the negotiator and the server glue.

/// Header names consulted during negotiation.
pub mod headers {
    pub use http::header::{ACCEPT, CONTENT_TYPE};

    /// Key used to look the `Accept` value up in keyword sources.
    pub const ACCEPT_KEY: &str = "Accept";
}

/// Preference assumed when the request carries no `Accept` header.
pub const DEFAULT_ACCEPT: &str = "text/html";

/// Format returned when nothing the resource offers is acceptable.
pub const FALLBACK_FORMAT: &str = "html";

/// Candidate type used for a format identifier missing from the table.
///
/// Kept byte-for-byte from the deployed behavior; it matches no registered
/// type, so such identifiers can only win through `*/*` and then fall back.
pub const UNREGISTERED_FORMAT_TYPE: &str = "txt/plain";

/// Response content type for formats without a registered type.
pub const DEFAULT_RESPONSE_TYPE: &str = "text/plain";

/// Content type of pre-rendered HTML documents.
pub const HTML_RESPONSE_TYPE: &str = "text/html";

/// Bodies starting with this prefix are complete HTML documents.
pub const HTML_DOCTYPE: &str = "<!DOCTYPE html>";

/// Charset appended to every formatted response.
pub const DEFAULT_CHARSET: &str = "UTF-8";

/// Query parameter that overrides negotiation.
pub const FORMAT_PARAM: &str = "format";
