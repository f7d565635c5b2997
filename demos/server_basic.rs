//! Basic content negotiation server example
//!
//! Serves one concept as HTML, JSON or Turtle depending on the `Accept`
//! header or the `format` query parameter.
//!
//! Run with: cargo run --example server_basic
//!
//! Then try:
//!
//! ```text
//! curl -H 'Accept: application/json' http://localhost:3000/concept/aspirin
//! curl -H 'Accept: text/*' http://localhost:3000/concept/aspirin
//! curl 'http://localhost:3000/concept/aspirin?format=turtle'
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware::from_fn,
    routing::{get, Router},
};
use conneg_axum_http::{
    server::{href::append_params, Formatted, HrefSettings},
    FormatResult, NegotiateLayer, NegotiatedFormat, Negotiator, ServerConfig,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    href: Arc<HrefSettings>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let config = ServerConfig {
        href: HrefSettings::new("http://localhost:3000", ""),
        ..Default::default()
    };
    let state = AppState {
        href: Arc::new(config.href.clone()),
    };
    let layer = NegotiateLayer::new(Negotiator::default(), ["html", "json", "turtle"])
        .with_config(config);

    let app = Router::new()
        .route("/concept/{name}", get(handle_concept))
        .layer(from_fn(layer.middleware()))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
    tracing::info!("Listening on http://localhost:3000");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn handle_concept(
    State(state): State<AppState>,
    Path(name): Path<String>,
    negotiated: NegotiatedFormat,
) -> Formatted {
    if name.is_empty() || !name.chars().all(char::is_alphanumeric) {
        return negotiated.respond(FormatResult::failure(
            StatusCode::NOT_FOUND,
            format!("Unknown concept: {}", name),
        ));
    }

    let uri = state.href.complete_uri_sans_params(&format!("/concept/{}", name));
    let uri = match append_params(&uri, [("format", negotiated.format.as_str())]) {
        Ok(uri) => uri,
        Err(err) => return negotiated.respond(err.into()),
    };

    let body = match negotiated.format.as_str() {
        "json" => serde_json::json!({ "label": name, "href": uri }).to_string(),
        "turtle" => format!("<{}> <http://www.w3.org/2000/01/rdf-schema#label> \"{}\" .", uri, name),
        _ => format!(
            "<!DOCTYPE html><html><body><a href=\"{}\">{}</a></body></html>",
            uri, name
        ),
    };
    negotiated.respond(FormatResult::success(body))
}
