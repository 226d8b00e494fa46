//! Route definitions for media, mounted at `/media`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::handlers::media;
use crate::state::AppState;

/// ```text
/// GET    /              -> list_media
/// POST   /              -> create_media
/// POST   /upload        -> upload_media (multipart, up to `max_upload_bytes`)
/// POST   /upload-url    -> upload_media_from_url
/// GET    /{id}          -> get_media
/// PUT    /{id}          -> update_media
/// DELETE /{id}          -> delete_media
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    let uploads = Router::new()
        .route("/upload", post(media::upload_media))
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload_bytes));

    Router::new()
        .route("/", get(media::list_media).post(media::create_media))
        .route("/upload-url", post(media::upload_media_from_url))
        .route(
            "/{id}",
            get(media::get_media)
                .put(media::update_media)
                .delete(media::delete_media),
        )
        .merge(uploads)
}
