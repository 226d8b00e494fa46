//! Shared response envelope types for API handlers.
//!
//! Successful responses use `{ "success": true, "message": ..., "data": ... }`.
//! Paginated lists add a `meta` object. Keys are snake_case here and are
//! camelCased on the way out by [`crate::middleware::case_converter`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::listing::{Listing, PageMeta};
use serde::Serialize;

/// Standard success envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::ok("Brand retrieved successfully", brand)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope with no `data` field.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Success envelope for one page of a list.
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Render a [`Listing`] as either a plain or a paginated envelope.
pub fn listing_response<T: Serialize>(message: &str, listing: Listing<T>) -> Response {
    match listing {
        Listing::All(rows) => Json(ApiResponse::ok(message, rows)).into_response(),
        Listing::Page(page) => Json(PaginatedResponse {
            success: true,
            message: message.to_string(),
            data: page.data,
            meta: page.meta,
        })
        .into_response(),
    }
}

/// `201 Created` with the standard envelope.
pub fn created<T: Serialize>(message: &str, data: T) -> Response {
    (StatusCode::CREATED, Json(ApiResponse::ok(message, data))).into_response()
}
