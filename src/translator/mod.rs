//! Translation gateway.
//!
//! A small client for a remote translation service, used to present
//! terminology in another language. See [`Gateway`].

mod config;
mod gateway;

pub use config::{TranslatorConfig, DEFAULT_AUTH_URL, DEFAULT_SCOPE, DEFAULT_TRANSLATE_URL};
pub use gateway::{strip_wrapper, wrap, Gateway, SERIALIZATION_NAMESPACE};
