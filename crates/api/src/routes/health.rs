use axum::extract::State;
use axum::http::StatusCode;
use axum::{routing::get, Json, Router};
use catalog_core::types::Timestamp;
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database answers, `unhealthy` otherwise.
    pub status: &'static str,
    pub timestamp: Timestamp,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
}

/// GET /health, GET /ping -- returns service and database health.
///
/// Answers 503 when the database is unreachable.
async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let (status, code) = match catalog_db::health_check(&state.pool).await {
        Ok(()) => ("ok", StatusCode::OK),
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            ("unhealthy", StatusCode::SERVICE_UNAVAILABLE)
        }
    };

    (
        code,
        Json(HealthResponse {
            status,
            timestamp: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

/// Mount health check routes (intended for root level, NOT under `/api`).
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_check))
        .route("/ping", get(health_check))
}
