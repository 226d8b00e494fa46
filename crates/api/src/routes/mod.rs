pub mod brand;
pub mod category;
pub mod health;
pub mod media;

use axum::Router;

use crate::config::ServerConfig;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /brands                         list, create
/// /brands/active                  active brands by name
/// /brands/grouped                 active brands grouped by first letter
/// /brands/{id}                    get, update, delete
///
/// /categories                     list, create
/// /categories/active              active categories by name
/// /categories/slug/{slug}         categories with a slug
/// /categories/{id}                get, update, delete
///
/// /media                          list, create
/// /media/upload                   upload (multipart)
/// /media/upload-url               upload from a remote URL
/// /media/{id}                     get, update, delete
/// ```
pub fn api_routes(config: &ServerConfig) -> Router<AppState> {
    Router::new()
        .nest("/brands", brand::router())
        .nest("/categories", category::router())
        .nest("/media", media::router(config.max_upload_bytes))
}
