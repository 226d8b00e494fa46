//! Handlers for `/api/media`.
//!
//! Besides the shared CRUD endpoints, media rows can be created from a
//! multipart upload or from a remote URL. Both go through the configured
//! [`catalog_storage::FileStorage`] first and only then insert the row.
//! Deleting a media row deletes the stored file first; if the provider
//! refuses, the row is left untouched.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::types::DbId;
use catalog_db::models::media::{CreateMedia, Media, UpdateMedia, UploadFromUrl};
use catalog_db::mutation;
use catalog_storage::{file_extension, file_name_from_url, UploadedFile};

use super::{find_or_404, list_resource, not_found, ListParams};
use crate::error::{AppError, AppResult};
use crate::extract::{ApiMultipart, ApiPath, ApiQuery, ValidatedJson};
use crate::response::{created, listing_response, ApiResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// GET /api/media
pub async fn list_media(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Response> {
    let media = list_resource::<Media>(&state.pool, params).await?;
    Ok(listing_response("Media retrieved successfully", media))
}

/// GET /api/media/{id}
pub async fn get_media(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let media = find_or_404::<Media>(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok("Media retrieved successfully", media)))
}

/// POST /api/media
///
/// Registers a file that is already stored at the provider.
pub async fn create_media(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateMedia>,
) -> AppResult<Response> {
    let media = mutation::create::<Media>(&state.pool, &input).await?;

    tracing::info!(media_id = %media.id, file_id = %media.file_id, "Media created");

    Ok(created("Media created successfully", media))
}

/// PUT /api/media/{id}
pub async fn update_media(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateMedia>,
) -> AppResult<impl IntoResponse> {
    let media = mutation::update::<Media>(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found::<Media>(id))?;

    tracing::info!(media_id = %id, "Media updated");

    Ok(Json(ApiResponse::ok("Media updated successfully", media)))
}

/// DELETE /api/media/{id}
///
/// Order: load the live row, delete the stored file, then soft-delete the
/// row. A storage failure returns 502 before anything is written. A file the
/// provider no longer has counts as deleted, so a retry after a failed
/// soft-delete can finish the job.
pub async fn delete_media(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let media = find_or_404::<Media>(&state.pool, id).await?;

    match state.storage.delete_file(&media.file_id).await {
        Ok(()) => {}
        Err(e) if e.is_not_found() => {
            tracing::warn!(media_id = %id, file_id = %media.file_id, "Stored file already gone");
        }
        Err(e) => return Err(e.into()),
    }

    if !mutation::soft_delete::<Media>(&state.pool, id).await? {
        // Deleted concurrently after the lookup above.
        return Err(not_found::<Media>(id));
    }

    tracing::info!(media_id = %id, file_id = %media.file_id, "Media deleted");

    Ok(Json(ApiResponse::message("Media deleted successfully")))
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

/// POST /api/media/upload
///
/// Multipart form with a single `file` part. Other parts are ignored.
pub async fn upload_media(
    State(state): State<AppState>,
    ApiMultipart(mut multipart): ApiMultipart,
) -> AppResult<Response> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload").to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        file = Some((file_name, data.to_vec()));
    }

    let (file_name, data) =
        file.ok_or_else(|| AppError::BadRequest("Missing multipart field 'file'".to_string()))?;
    if data.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
    }

    let byte_len = data.len() as i64;
    let uploaded = state.storage.upload_file(&file_name, data).await?;
    let media = record_upload(&state, uploaded, &file_name, byte_len).await?;

    Ok(created("File uploaded successfully", media))
}

/// POST /api/media/upload-url
///
/// The provider fetches the file itself. `file_name` defaults to the last
/// path segment of `url`.
pub async fn upload_media_from_url(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<UploadFromUrl>,
) -> AppResult<Response> {
    let file_name = match input.file_name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => file_name_from_url(&input.url),
    };

    let uploaded = state.storage.upload_from_url(&input.url, &file_name).await?;
    let media = record_upload(&state, uploaded, &file_name, 0).await?;

    Ok(created("File uploaded successfully", media))
}

/// Insert the media row for a file the provider has just accepted.
///
/// If the insert fails the stored file is deleted again, best effort, so the
/// provider does not keep a file nothing points at.
async fn record_upload(
    state: &AppState,
    uploaded: UploadedFile,
    file_name: &str,
    byte_len: i64,
) -> AppResult<Media> {
    let input = media_from_upload(&uploaded, file_name, byte_len);

    match mutation::create::<Media>(&state.pool, &input).await {
        Ok(media) => {
            tracing::info!(media_id = %media.id, file_id = %media.file_id, "File uploaded");
            Ok(media)
        }
        Err(e) => {
            if let Err(cleanup) = state.storage.delete_file(&uploaded.file_id).await {
                tracing::warn!(
                    file_id = %uploaded.file_id,
                    error = %cleanup,
                    "Failed to remove stored file after insert error",
                );
            }
            Err(e.into())
        }
    }
}

/// Map a provider result onto a media row.
///
/// `file_type` is the extension of the client's file name, falling back to
/// the provider's type. `size` falls back to the byte count we sent.
fn media_from_upload(uploaded: &UploadedFile, file_name: &str, byte_len: i64) -> CreateMedia {
    let extension = file_extension(file_name);
    let file_type = if extension.is_empty() {
        uploaded.file_type.clone()
    } else {
        extension
    };
    let size = if uploaded.size > 0 { uploaded.size } else { byte_len };

    CreateMedia {
        file_id: uploaded.file_id.clone(),
        file_name: file_name.to_string(),
        url: uploaded.url.clone(),
        thumb_url: uploaded.thumb_url.clone(),
        file_type,
        size,
        description: None,
    }
}
