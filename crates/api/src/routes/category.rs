//! Route definitions for categories, mounted at `/categories`.

use axum::routing::get;
use axum::Router;

use crate::handlers::category;
use crate::state::AppState;

/// ```text
/// GET    /              -> list_categories
/// POST   /              -> create_category
/// GET    /active        -> list_active_categories
/// GET    /slug/{slug}   -> list_categories_by_slug
/// GET    /{id}          -> get_category
/// PUT    /{id}          -> update_category
/// DELETE /{id}          -> delete_category
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(category::list_categories).post(category::create_category))
        .route("/active", get(category::list_active_categories))
        .route("/slug/{slug}", get(category::list_categories_by_slug))
        .route(
            "/{id}",
            get(category::get_category)
                .put(category::update_category)
                .delete(category::delete_category),
        )
}
