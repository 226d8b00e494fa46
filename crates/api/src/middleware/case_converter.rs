//! JSON key-case conversion at the HTTP boundary.
//!
//! Clients send and receive camelCase keys; handlers, DTOs and row structs
//! only ever see snake_case. [`convert_case`] rewrites request bodies toward
//! snake_case and JSON response bodies toward camelCase.
//!
//! The conversion fails open. A body that is not a JSON object or array, or
//! that cannot be parsed, is forwarded byte-for-byte. So is a request body
//! whose size is unknown or larger than the configured limit; it is never
//! buffered here. The only error the middleware produces itself is a 400
//! when a request body it started to read breaks off. The response status
//! code is always the one the handler chose.

use axum::body::{to_bytes, Body, Bytes, HttpBody};
use axum::extract::{Request, State};
use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use catalog_core::casing::{convert_keys, Case};
use serde_json::Value;

use crate::error::AppError;

/// Middleware entry point, installed with `axum::middleware::from_fn_with_state`
/// and the largest request body (in bytes) it may buffer.
pub async fn convert_case(State(max_body): State<usize>, request: Request, next: Next) -> Response {
    let request = if wants_request_conversion(request.method(), request.headers()) {
        match convert_request(request, max_body).await {
            Ok(request) => request,
            Err(e) => return e.into_response(),
        }
    } else {
        request
    };

    let response = next.run(request).await;

    if is_json(response.headers()) {
        convert_response(response).await
    } else {
        response
    }
}

/// Requests are rewritten when the body is declared JSON, or on GET.
fn wants_request_conversion(method: &Method, headers: &HeaderMap) -> bool {
    method == Method::GET || is_json(headers)
}

/// `application/json` or any `+json` media type, parameters ignored.
fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value.split(';').next().unwrap_or("").trim();
    mime.eq_ignore_ascii_case("application/json")
        || mime.to_ascii_lowercase().ends_with("+json")
}

/// Declared body size: `Content-Length`, else the body's own exact size.
fn body_len(request: &Request) -> Option<u64> {
    request
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
        .or_else(|| request.body().size_hint().exact())
}

async fn convert_request(request: Request, max_body: usize) -> Result<Request, AppError> {
    match body_len(&request) {
        Some(len) if len <= max_body as u64 => {}
        len => {
            tracing::debug!(?len, max_body, "Request body not buffered for case conversion");
            return Ok(request);
        }
    }

    let (mut parts, body) = request.into_parts();

    let bytes = to_bytes(body, max_body).await.map_err(|e| {
        tracing::warn!(error = %e, "Failed to read request body for case conversion");
        AppError::BadRequest("Failed to read request body".to_string())
    })?;

    let bytes = match transcode(&bytes, Case::Snake) {
        Some(converted) => {
            set_content_length(&mut parts.headers, converted.len());
            converted
        }
        None => bytes,
    };

    Ok(Request::from_parts(parts, Body::from(bytes)))
}

async fn convert_response(response: Response) -> Response {
    let (mut parts, body) = response.into_parts();

    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read response body for case conversion");
            parts.headers.remove(CONTENT_LENGTH);
            return Response::from_parts(parts, Body::empty());
        }
    };

    let bytes = match transcode(&bytes, Case::Camel) {
        Some(converted) => converted,
        None => bytes,
    };
    set_content_length(&mut parts.headers, bytes.len());

    Response::from_parts(parts, Body::from(bytes))
}

/// Re-encode `bytes` with converted keys.
///
/// Returns `None` (leave the body alone) unless it parses as a JSON object
/// or array.
fn transcode(bytes: &[u8], case: Case) -> Option<Bytes> {
    if bytes.is_empty() {
        return None;
    }

    let value = match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ (Value::Object(_) | Value::Array(_))) => value,
        Ok(_) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "Body is not valid JSON, forwarding unchanged");
            return None;
        }
    };

    match serde_json::to_vec(&convert_keys(value, case)) {
        Ok(encoded) => Some(Bytes::from(encoded)),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to re-encode converted body");
            None
        }
    }
}

fn set_content_length(headers: &mut HeaderMap, len: usize) {
    headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
}
