//! Handlers for `/api/brands`.

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_core::types::DbId;
use catalog_db::models::brand::{Brand, CreateBrand, UpdateBrand};
use catalog_db::mutation;
use catalog_db::repositories::BrandRepo;

use super::{find_or_404, list_resource, not_found, ListParams};
use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::response::{created, listing_response, ApiResponse};
use crate::state::AppState;

/// GET /api/brands
///
/// Supports `search`, `trashed`, `sort_by`, `sort_direction`, `paginate`,
/// `page` and `per_page`.
pub async fn list_brands(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Response> {
    let brands = list_resource::<Brand>(&state.pool, params).await?;
    Ok(listing_response("Brands retrieved successfully", brands))
}

/// GET /api/brands/{id}
pub async fn get_brand(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let brand = find_or_404::<Brand>(&state.pool, id).await?;
    Ok(Json(ApiResponse::ok("Brand retrieved successfully", brand)))
}

/// POST /api/brands
pub async fn create_brand(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateBrand>,
) -> AppResult<Response> {
    let brand = mutation::create::<Brand>(&state.pool, &input).await?;

    tracing::info!(brand_id = %brand.id, slug = %brand.slug, "Brand created");

    Ok(created("Brand created successfully", brand))
}

/// PUT /api/brands/{id}
///
/// Partial update: only fields present in the body are changed.
pub async fn update_brand(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
    ValidatedJson(input): ValidatedJson<UpdateBrand>,
) -> AppResult<impl IntoResponse> {
    let brand = mutation::update::<Brand>(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found::<Brand>(id))?;

    tracing::info!(brand_id = %id, "Brand updated");

    Ok(Json(ApiResponse::ok("Brand updated successfully", brand)))
}

/// DELETE /api/brands/{id}
pub async fn delete_brand(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<impl IntoResponse> {
    if !mutation::soft_delete::<Brand>(&state.pool, id).await? {
        return Err(not_found::<Brand>(id));
    }

    tracing::info!(brand_id = %id, "Brand deleted");

    Ok(Json(ApiResponse::message("Brand deleted successfully")))
}

/// GET /api/brands/active
pub async fn list_active_brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let brands = BrandRepo::list_active(&state.pool).await?;
    Ok(Json(ApiResponse::ok("Active brands retrieved successfully", brands)))
}

/// GET /api/brands/grouped
///
/// Active brands bucketed by the uppercase first letter of their name.
pub async fn list_grouped_brands(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let groups = BrandRepo::list_grouped(&state.pool).await?;
    Ok(Json(ApiResponse::ok("Grouped brands retrieved successfully", groups)))
}
