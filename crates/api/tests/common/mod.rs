#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use catalog_storage::{FileStorage, StorageError, UploadedFile};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use catalog_api::config::ServerConfig;
use catalog_api::router::build_app_router;
use catalog_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default)
/// and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 1024 * 1024,
        max_json_bytes: 64 * 1024,
        db_max_connections: 5,
    }
}

/// Build the full application router over `pool` with a storage stub that
/// accepts everything.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_storage(pool, Arc::new(StubStorage::succeeding()))
}

/// Build the full application router with the given storage backend.
pub fn build_test_app_with_storage(pool: PgPool, storage: Arc<dyn FileStorage>) -> Router {
    let config = test_config();
    let state = AppState { pool, storage };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Storage stub
// ---------------------------------------------------------------------------

/// In-memory [`FileStorage`] that either accepts or rejects every call.
#[derive(Debug, Default)]
pub struct StubStorage {
    fail: bool,
    files_gone: bool,
    pub uploads: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl StubStorage {
    pub fn succeeding() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Uploads succeed; every delete answers 404 as if the file was removed
    /// by an earlier call.
    pub fn files_gone() -> Self {
        Self {
            files_gone: true,
            ..Self::default()
        }
    }

    pub fn delete_calls(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.fail {
            Err(StorageError::Api {
                status: 500,
                message: "provider unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn stored(&self, file_name: &str, size: i64) -> UploadedFile {
        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        UploadedFile {
            file_id: format!("stub_{n}"),
            name: file_name.to_string(),
            url: format!("https://files.example.com/{file_name}"),
            thumb_url: Some(format!("https://files.example.com/tr:n-thumb/{file_name}")),
            size,
            file_type: "image".to_string(),
        }
    }
}

#[async_trait]
impl FileStorage for StubStorage {
    async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedFile, StorageError> {
        self.check()?;
        Ok(self.stored(file_name, bytes.len() as i64))
    }

    async fn upload_from_url(&self, _url: &str, file_name: &str) -> Result<UploadedFile, StorageError> {
        self.check()?;
        Ok(self.stored(file_name, 4096))
    }

    async fn delete_file(&self, file_id: &str) -> Result<(), StorageError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        if self.files_gone {
            return Err(StorageError::Api {
                status: 404,
                message: format!("No file with id {file_id}"),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("POST", uri, body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, json_request("PUT", uri, body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
