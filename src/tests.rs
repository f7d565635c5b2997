//! Crate-level tests: negotiation properties and the Axum integration end to end.

use crate::protocol::Nested::{Item, Seq};
use crate::protocol::{best_match, flatten_one_level, parse_preferences, to_sequence, Nested};
use crate::server::{FormatResult, Formatted, MalformedAccept};
use crate::{FormatTable, NegotiateLayer, NegotiatedFormat, Negotiator, ServerConfig};
use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, Request, StatusCode},
    middleware::from_fn,
    response::Response,
    routing::get,
    Router,
};
use tower::ServiceExt;

fn accept(value: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_str(value).unwrap());
    headers
}

#[test]
fn test_equal_weights_keep_header_order() {
    let prefs = parse_preferences("a/a;q=0.5, b/b, c/c;q=0.5, d/d, e/e;q=0.5").unwrap();
    assert_eq!(prefs, vec!["b/b", "d/d", "a/a", "c/c", "e/e"]);
}

#[test]
fn test_server_order_does_not_change_winner() {
    let headers = [
        "application/json",
        "text/*;q=0.9, application/json;q=0.5",
        "image/png, text/turtle",
        "application/*, text/turtle",
    ];
    let forward = ["text/turtle", "application/json"];
    let backward = ["application/json", "text/turtle"];
    for header in headers {
        let prefs = parse_preferences(header).unwrap();
        assert_eq!(
            best_match(&forward, &prefs),
            best_match(&backward, &prefs),
            "header {header}"
        );
    }
}

#[test]
fn test_exact_beats_wildcard() {
    assert_eq!(best_match(&["text/html", "text/*"], &["text/html"]), Some("text/html"));
    assert_eq!(best_match(&["text/*", "text/html"], &["text/html"]), Some("text/html"));
}

#[test]
fn test_universal_wildcard_assigned_once() {
    assert_eq!(best_match(&["a/b", "c/d"], &["*/*"]), Some("a/b"));
}

#[test]
fn test_json_requested() {
    let negotiator = Negotiator::default();
    let format = negotiator
        .negotiate_headers(&["html", "json"], &accept("application/json"))
        .unwrap();
    assert_eq!(format, "json");
}

#[test]
fn test_no_accept_header_means_html() {
    let negotiator = Negotiator::default();
    let format = negotiator
        .negotiate_headers(&["html", "json"], &HeaderMap::new())
        .unwrap();
    assert_eq!(format, "html");
}

#[test]
fn test_to_sequence_examples() {
    assert_eq!(to_sequence(None, Some(Item("x")), 2), vec![Item("x"), Item("x")]);
    assert_eq!(
        to_sequence(Some(Nested::<&str>::from("abc")), None, 0),
        vec![Item("abc")]
    );
}

#[test]
fn test_flatten_one_level_keeps_inner_nesting() {
    let value = Seq(vec![
        Seq(vec![Item(1), Item(2)]),
        Seq(vec![Item(3), Seq(vec![Item(4)])]),
    ]);
    assert_eq!(
        flatten_one_level(Some(&value)),
        Some(Seq(vec![Item(1), Item(2), Item(3), Seq(vec![Item(4)])]))
    );
}

#[test]
fn test_every_table_type_round_trips() {
    let negotiator = Negotiator::default();
    let table = negotiator.table();
    for id in table.ids() {
        for mime_type in table.types_of(id).unwrap() {
            let format = negotiator
                .negotiate_headers(&[id], &accept(mime_type))
                .unwrap();
            assert_eq!(format, id, "Accept: {mime_type}");
        }
    }
}

#[test]
fn test_round_trip_with_custom_table() {
    let table = FormatTable::builder()
        .format("csv", ["text/csv", "application/csv"])
        .format("tsv", "text/tab-separated-values")
        .build()
        .unwrap();
    let negotiator = Negotiator::new(table);
    assert_eq!(
        negotiator
            .negotiate_headers(&["csv", "tsv"], &accept("text/tab-separated-values"))
            .unwrap(),
        "tsv"
    );
}

async fn concept(negotiated: NegotiatedFormat) -> Formatted {
    let body = match negotiated.format.as_str() {
        "json" => r#"{"label": "aspirin"}"#.to_string(),
        "turtle" => "<aspirin> a <Drug> .".to_string(),
        _ => "<!DOCTYPE html><p>aspirin</p>".to_string(),
    };
    negotiated.respond(FormatResult::success(body))
}

async fn missing(negotiated: NegotiatedFormat) -> Formatted {
    negotiated.respond(FormatResult::failure(StatusCode::NOT_FOUND, "unknown concept"))
}

fn app(layer: NegotiateLayer) -> Router {
    Router::new()
        .route("/concept", get(concept))
        .route("/missing", get(missing))
        .layer(from_fn(layer.middleware()))
}

fn default_layer() -> NegotiateLayer {
    NegotiateLayer::new(Negotiator::default(), ["html", "json", "turtle"])
}

async fn send(app: Router, uri: &str, accept: Option<&str>) -> Response {
    let mut request = Request::builder().uri(uri);
    if let Some(accept) = accept {
        request = request.header(header::ACCEPT, accept);
    }
    app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
}

async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_router_serves_json() {
    let response = send(app(default_layer()), "/concept", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json;charset=UTF-8"
    );
    assert_eq!(body_string(response).await, r#"{"label": "aspirin"}"#);
}

#[tokio::test]
async fn test_router_defaults_to_html() {
    let response = send(app(default_layer()), "/concept", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html;charset=UTF-8"
    );
}

#[tokio::test]
async fn test_router_query_override() {
    let response = send(
        app(default_layer()),
        "/concept?format=turtle",
        Some("application/json"),
    )
    .await;
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/turtle;charset=UTF-8"
    );
    assert_eq!(body_string(response).await, "<aspirin> a <Drug> .");
}

#[tokio::test]
async fn test_router_rejects_malformed_accept() {
    let response = send(app(default_layer()), "/concept", Some("application/json;q=high")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_router_rejects_non_finite_weight() {
    let accept = (0..21)
        .map(|i| format!("text/t{i};q=NaN"))
        .collect::<Vec<_>>()
        .join(", ");
    let response = send(app(default_layer()), "/concept", Some(accept.as_str())).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_router_ignores_malformed_accept_when_configured() {
    let layer = default_layer().with_config(ServerConfig {
        malformed_accept: MalformedAccept::Ignore,
        ..Default::default()
    });
    let response = send(app(layer), "/concept", Some("application/json;q=high")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/html;charset=UTF-8"
    );
}

#[tokio::test]
async fn test_router_failure_status() {
    let response = send(app(default_layer()), "/missing", Some("application/json")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "unknown concept");
}
