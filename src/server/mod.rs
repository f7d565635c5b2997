//! Axum integration for format negotiation.
//!
//! # Module Organization
//!
//! ```text
//! server/
//! ├── config     - ServerConfig and the malformed-Accept policy
//! ├── middleware - NegotiateLayer and the NegotiatedFormat extractor
//! ├── respond    - FormatResult and formatted responses
//! └── href       - Link construction and query string editing
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`NegotiateLayer`] | Middleware that negotiates every request |
//! | [`NegotiatedFormat`] | Per-request outcome, extractable in handlers |
//! | [`FormatResult`] | Handler outcome before formatting |
//! | [`Formatted`] | Response in the negotiated format |
//! | [`ServerConfig`] | Layer configuration |
//! | [`HrefSettings`] | Public address of the service |

mod config;
pub mod href;
mod middleware;
mod respond;

pub use config::{MalformedAccept, ServerConfig};
pub use href::HrefSettings;
pub use middleware::{NegotiateLayer, NegotiatedFormat};
pub use respond::{FormatResult, Formatted};
