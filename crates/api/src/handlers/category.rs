//! Handlers for `/api/categories`.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::types::DbId;
use catalog_db::models::category::{Category, CreateCategory, UpdateCategory};
use catalog_db::mutation;
use catalog_db::repositories::CategoryRepo;

use super::{find_or_404, list_resource, not_found, ListParams};
use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::response::{created, listing_response, ApiResponse};
use crate::state::AppState;

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Response> {
    let categories = list_resource::<Category>(&state.pool, params).await?;
    Ok(listing_response("Categories retrieved successfully", categories))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = find_or_404::<Category>(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok("Category retrieved successfully", category)))
}

/// POST /api/categories
///
/// An unknown `media_id` is rejected by the foreign key with a 422.
pub async fn create_category(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateCategory>,
) -> AppResult<Response> {
    let category = mutation::create::<Category>(&state.pool, &input).await?;

    tracing::info!(category_id = %category.id, slug = %category.slug, "Category created");

    Ok(created("Category created successfully", category))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = mutation::update::<Category>(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found::<Category>(id))?;

    tracing::info!(category_id = %id, "Category updated");

    Ok(Json(ApiResponse::ok("Category updated successfully", category)))
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !mutation::soft_delete::<Category>(&state.pool, id).await? {
        return Err(not_found::<Category>(id));
    }

    tracing::info!(category_id = %id, "Category deleted");

    Ok(Json(ApiResponse::message("Category deleted successfully")))
}

/// GET /api/categories/active
pub async fn list_active_categories(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_active(&state.pool).await?;
    Ok(Json(ApiResponse::ok("Active categories retrieved successfully", categories)))
}

/// GET /api/categories/slug/{slug}
pub async fn list_categories_by_slug(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::find_by_slug(&state.pool, &slug).await?;
    Ok(Json(ApiResponse::ok("Categories retrieved successfully", categories)))
}
