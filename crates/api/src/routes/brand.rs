//! Route definitions for brands, mounted at `/brands`.

use axum::routing::get;
use axum::Router;

use crate::handlers::brand;
use crate::state::AppState;

/// ```text
/// GET    /            -> list_brands
/// POST   /            -> create_brand
/// GET    /active      -> list_active_brands
/// GET    /grouped     -> list_grouped_brands
/// GET    /{id}        -> get_brand
/// PUT    /{id}        -> update_brand
/// DELETE /{id}        -> delete_brand
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(brand::list_brands).post(brand::create_brand))
        .route("/active", get(brand::list_active_brands))
        .route("/grouped", get(brand::list_grouped_brands))
        .route(
            "/{id}",
            get(brand::get_brand)
                .put(brand::update_brand)
                .delete(brand::delete_brand),
        )
}
