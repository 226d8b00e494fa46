//! Tests for the key-case conversion middleware.
//!
//! Runs the middleware in front of a few echo handlers; no database needed.

use axum::body::{Body, Bytes};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{middleware, Json, Router};
use catalog_api::middleware::case_converter::convert_case;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Reports the top-level keys the handler received.
async fn keys(Json(body): Json<Value>) -> impl IntoResponse {
    let keys: Vec<String> = body
        .as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default();
    (StatusCode::CREATED, Json(json!({ "seen_keys": keys, "echo_body": body })))
}

/// Returns the request body untouched as text.
async fn raw(body: Bytes) -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain")], body)
}

async fn broken_json() -> Response {
    ([(CONTENT_TYPE, "application/json")], "not json {").into_response()
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error_code": 7, "last_page": null })))
}

async fn list() -> impl IntoResponse {
    Json(json!([{ "file_name": "a.png" }, { "thumb_url": "b" }]))
}

/// Largest request body the middleware buffers in these tests.
const MAX_BODY: usize = 64;

fn app() -> Router {
    Router::new()
        .route("/keys", post(keys))
        .route("/raw", post(raw))
        .route("/broken", get(broken_json))
        .route("/missing", get(not_found))
        .route("/list", get(list))
        .layer(middleware::from_fn_with_state(MAX_BODY, convert_case))
}

async fn send(request: Request<Body>) -> (StatusCode, Option<String>, Bytes) {
    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let length = response
        .headers()
        .get(CONTENT_LENGTH)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, length, bytes)
}

fn post_req(uri: &str, content_type: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap()
}

fn get_req(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// -- request side -----------------------------------------------------------

#[tokio::test]
async fn request_keys_reach_handler_in_snake_case() {
    let (status, _, bytes) = send(post_req(
        "/keys",
        "application/json",
        r#"{"fileName":"a.png","perPage":2,"nested":{"thumbUrl":"x"}}"#,
    ))
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    let mut seen: Vec<String> = serde_json::from_value(json["seenKeys"].clone()).unwrap();
    seen.sort();
    assert_eq!(seen, vec!["file_name", "nested", "per_page"]);
}

#[tokio::test]
async fn malformed_json_request_is_forwarded_unchanged() {
    let body = r#"{"fileName": "#;
    let (status, _, bytes) = send(post_req("/raw", "application/json", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], body.as_bytes());
}

#[tokio::test]
async fn non_json_request_is_not_converted() {
    let body = r#"{"fileName":"a.png"}"#;
    let (_, _, bytes) = send(post_req("/raw", "text/plain", body)).await;

    assert_eq!(&bytes[..], body.as_bytes());
}

#[tokio::test]
async fn scalar_json_request_is_not_converted() {
    let (_, _, bytes) = send(post_req("/raw", "application/json", r#""fileName""#)).await;
    assert_eq!(&bytes[..], br#""fileName""#);
}

#[tokio::test]
async fn oversized_json_request_is_forwarded_unconverted() {
    let body = r#"{"fileName":"a-file-name-long-enough-to-pass-the-limit.png","perPage":2}"#;
    assert!(body.len() > MAX_BODY);

    let (status, _, bytes) = send(post_req("/raw", "application/json", body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], body.as_bytes());
}

#[tokio::test]
async fn body_longer_than_declared_is_a_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/raw")
        .header(CONTENT_TYPE, "application/json")
        .header(CONTENT_LENGTH, "10")
        .body(Body::from(r#"{"fileName":"a-file-name-long-enough-to-pass-the-limit.png","perPage":2}"#))
        .unwrap();

    let (status, _, bytes) = send(request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["success"], false);
    assert_eq!(json["code"], "BAD_REQUEST");
}

// -- response side ----------------------------------------------------------

#[tokio::test]
async fn response_keys_are_camel_cased_recursively() {
    let (_, length, bytes) = send(post_req("/keys", "application/json", r#"{"sortBy":"name"}"#)).await;

    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json["echoBody"], json!({ "sortBy": "name" }));
    assert!(json.get("seen_keys").is_none());
    assert_eq!(length, Some(bytes.len().to_string()));
}

#[tokio::test]
async fn response_arrays_are_converted() {
    let (_, _, bytes) = send(get_req("/list")).await;

    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!([{ "fileName": "a.png" }, { "thumbUrl": "b" }]));
}

#[tokio::test]
async fn response_status_is_preserved() {
    let (status, _, bytes) = send(get_req("/missing")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(json, json!({ "errorCode": 7, "lastPage": null }));
}

#[tokio::test]
async fn malformed_json_response_is_written_verbatim() {
    let (status, length, bytes) = send(get_req("/broken")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(&bytes[..], b"not json {");
    assert_eq!(length, Some("10".to_string()));
}

#[tokio::test]
async fn non_json_response_is_untouched() {
    let (_, _, bytes) = send(post_req("/raw", "text/plain", r#"{"file_name":1}"#)).await;
    assert_eq!(&bytes[..], br#"{"file_name":1}"#);
}
