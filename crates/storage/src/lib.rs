//! External file storage for media uploads.
//!
//! [`FileStorage`] is the seam the API layer talks to; [`ImageKitClient`] is
//! the production implementation.

use async_trait::async_trait;
use serde::Serialize;

pub mod imagekit;

pub use imagekit::{ImageKitClient, ImageKitConfig};

/// A file accepted by the storage provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedFile {
    /// Provider-side identifier, needed to delete the file later.
    pub file_id: String,
    pub name: String,
    pub url: String,
    pub thumb_url: Option<String>,
    /// Size in bytes.
    pub size: i64,
    pub file_type: String,
}

/// Errors from the storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("Storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-2xx status.
    #[error("Storage provider error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Storage provider credentials are not configured")]
    NotConfigured,

    #[error("Unexpected storage response: {0}")]
    InvalidResponse(String),
}

impl StorageError {
    /// The provider has no file under the requested id.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::Api { status: 404, .. })
    }
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Upload raw bytes under `file_name`.
    async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedFile, StorageError>;

    /// Ask the provider to fetch and store the file at `url`.
    async fn upload_from_url(&self, url: &str, file_name: &str) -> Result<UploadedFile, StorageError>;

    async fn delete_file(&self, file_id: &str) -> Result<(), StorageError>;
}

/// Last non-empty path segment of a URL, ignoring query and fragment.
///
/// Falls back to `"file"` when the path has no usable segment.
///
/// ```
/// use catalog_storage::file_name_from_url;
///
/// assert_eq!(file_name_from_url("https://cdn.example.com/img/logo.png?v=2"), "logo.png");
/// assert_eq!(file_name_from_url("https://cdn.example.com/"), "file");
/// ```
pub fn file_name_from_url(url: &str) -> String {
    let without_query = url.split(['?', '#']).next().unwrap_or(url);
    let path = match without_query.split_once("://") {
        Some((_, rest)) => rest.split_once('/').map(|(_, path)| path).unwrap_or(""),
        None => without_query,
    };
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("file")
        .to_string()
}

/// Lowercased extension of `file_name`, or an empty string.
pub fn file_extension(file_name: &str) -> String {
    match file_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    }
}
