use std::sync::Arc;

use catalog_storage::FileStorage;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: catalog_db::DbPool,
    /// External file storage used by the media endpoints.
    pub storage: Arc<dyn FileStorage>,
}
