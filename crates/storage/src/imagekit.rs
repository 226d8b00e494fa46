//! ImageKit upload and file management client.
//!
//! Uploads go to the upload endpoint as multipart forms; deletes go to the
//! management API. Both authenticate with HTTP basic auth using the private
//! key as the user name and an empty password.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::{FileStorage, StorageError, UploadedFile};

const DEFAULT_UPLOAD_URL: &str = "https://upload.imagekit.io/api/v1/files/upload";
const DEFAULT_API_URL: &str = "https://api.imagekit.io/v1";

/// ImageKit credentials and endpoints.
#[derive(Debug, Clone)]
pub struct ImageKitConfig {
    pub private_key: String,
    pub upload_url: String,
    pub api_url: String,
}

impl ImageKitConfig {
    /// Load from environment variables.
    ///
    /// | Env var                 | Default                                          |
    /// |-------------------------|--------------------------------------------------|
    /// | `IMAGEKIT_PRIVATE_KEY`  | empty (uploads and deletes are refused)          |
    /// | `IMAGEKIT_UPLOAD_URL`   | `https://upload.imagekit.io/api/v1/files/upload` |
    /// | `IMAGEKIT_API_URL`      | `https://api.imagekit.io/v1`                     |
    pub fn from_env() -> Self {
        let var_or = |name: &str, default: &str| {
            std::env::var(name)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            private_key: std::env::var("IMAGEKIT_PRIVATE_KEY").unwrap_or_default(),
            upload_url: var_or("IMAGEKIT_UPLOAD_URL", DEFAULT_UPLOAD_URL),
            api_url: var_or("IMAGEKIT_API_URL", DEFAULT_API_URL),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.private_key.is_empty()
    }
}

/// Upload response body from ImageKit.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    file_id: String,
    name: String,
    url: String,
    thumbnail_url: Option<String>,
    #[serde(default)]
    size: i64,
    #[serde(default)]
    file_type: String,
}

impl From<UploadResponse> for UploadedFile {
    fn from(r: UploadResponse) -> Self {
        Self {
            file_id: r.file_id,
            name: r.name,
            url: r.url,
            thumb_url: r.thumbnail_url.filter(|u| !u.is_empty()),
            size: r.size,
            file_type: r.file_type,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    message: String,
}

pub struct ImageKitClient {
    client: reqwest::Client,
    config: ImageKitConfig,
}

impl ImageKitClient {
    pub fn new(config: ImageKitConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn ensure_configured(&self) -> Result<(), StorageError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(StorageError::NotConfigured)
        }
    }

    async fn upload(&self, file: Part, file_name: &str) -> Result<UploadedFile, StorageError> {
        let form = Form::new()
            .part("file", file)
            .text("fileName", file_name.to_string())
            .text("useUniqueFileName", "true");

        let response = self
            .client
            .post(&self.config.upload_url)
            .basic_auth(&self.config.private_key, Some(""))
            .multipart(form)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        let parsed: UploadResponse = serde_json::from_str(&body)
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))?;
        Ok(parsed.into())
    }

    // ---- private helpers ----

    /// Map a non-2xx response to [`StorageError::Api`], preferring the
    /// provider's `message` field over the raw body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StorageError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        Err(StorageError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl FileStorage for ImageKitClient {
    async fn upload_file(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedFile, StorageError> {
        self.ensure_configured()?;
        tracing::debug!(file_name, size = bytes.len(), "Uploading file to ImageKit");
        let part = Part::bytes(bytes).file_name(file_name.to_string());
        self.upload(part, file_name).await
    }

    async fn upload_from_url(&self, url: &str, file_name: &str) -> Result<UploadedFile, StorageError> {
        self.ensure_configured()?;
        tracing::debug!(url, file_name, "Uploading remote file to ImageKit");
        self.upload(Part::text(url.to_string()), file_name).await
    }

    /// A file the provider no longer knows comes back as `Api { status: 404 }`;
    /// see [`StorageError::is_not_found`].
    async fn delete_file(&self, file_id: &str) -> Result<(), StorageError> {
        self.ensure_configured()?;
        let response = self
            .client
            .delete(format!("{}/files/{}", self.config.api_url, file_id))
            .basic_auth(&self.config.private_key, Some(""))
            .send()
            .await?;

        Self::ensure_success(response).await?;
        tracing::debug!(file_id, "Deleted file from ImageKit");
        Ok(())
    }
}
