use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog_core::error::CoreError;
use catalog_storage::StorageError;
use serde::Serialize;
use validator::{ValidationError, ValidationErrors};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `catalog_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The file storage provider failed or is not configured.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Request payload failed field validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
    pub code: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            code,
            description: None,
            data: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    ErrorBody::new("NOT_FOUND", format!("{entity} not found"))
                        .with_description(format!("{entity} with id {id} not found")),
                ),
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, ErrorBody::new("CONFLICT", msg.clone())),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, ErrorBody::new("UNAUTHORIZED", msg.clone()))
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorBody::new("FORBIDDEN", msg.clone())),
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Storage errors ---
            AppError::Storage(err) => {
                tracing::error!(error = %err, "File storage error");
                (
                    StatusCode::BAD_GATEWAY,
                    ErrorBody::new("STORAGE_ERROR", "File storage request failed"),
                )
            }

            // --- Request errors ---
            AppError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody::new("VALIDATION_ERROR", "Validation failed")
                    .with_description("One or more fields are invalid")
                    .with_data(field_messages(errors)),
            ),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new("BAD_REQUEST", msg.clone())),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal_error()
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn internal_error() -> (StatusCode, ErrorBody) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        ErrorBody::new("INTERNAL_ERROR", "An internal error occurred"),
    )
}

/// Classify a sqlx error into an HTTP status and error body.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Foreign key and check violations map to 422.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, ErrorBody) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            ErrorBody::new("NOT_FOUND", "Resource not found"),
        ),
        sqlx::Error::Database(db_err) => {
            let constraint = db_err.constraint().unwrap_or("unknown");
            match db_err.code().as_deref() {
                // PostgreSQL unique constraint violation
                Some("23505") if constraint.starts_with("uq_") => {
                    return (
                        StatusCode::CONFLICT,
                        ErrorBody::new(
                            "CONFLICT",
                            format!("Duplicate value violates unique constraint: {constraint}"),
                        ),
                    );
                }
                // foreign_key_violation, check_violation
                Some("23503") | Some("23514") => {
                    return (
                        StatusCode::UNPROCESSABLE_ENTITY,
                        ErrorBody::new("VALIDATION_ERROR", "Validation failed")
                            .with_description(format!("Value violates constraint: {constraint}")),
                    );
                }
                _ => {}
            }
            tracing::error!(error = %db_err, "Database error");
            internal_error()
        }
        other => {
            tracing::error!(error = %other, "Database error");
            internal_error()
        }
    }
}

/// `{ field: [messages] }` for a set of validation failures, fields sorted.
fn field_messages(errors: &ValidationErrors) -> serde_json::Value {
    let fields: BTreeMap<String, Vec<String>> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs.iter().map(|e| describe(&field, e)).collect();
            (field.to_string(), messages)
        })
        .collect();
    serde_json::json!(fields)
}

fn describe(field: &str, err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }

    let param = |name: &str| err.params.get(name).map(|v| v.to_string());
    match err.code.as_ref() {
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("{field} must be between {min} and {max} characters"),
            (Some(min), None) => format!("{field} must be at least {min} characters"),
            (None, Some(max)) => format!("{field} must be at most {max} characters"),
            (None, None) => format!("{field} has an invalid length"),
        },
        "range" => match param("min") {
            Some(min) => format!("{field} must be at least {min}"),
            None => format!("{field} is out of range"),
        },
        "url" => format!("{field} must be a valid URL"),
        code => format!("{field} is invalid ({code})"),
    }
}
