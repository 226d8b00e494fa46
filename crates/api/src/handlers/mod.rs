//! Request handlers, one module per resource.
//!
//! The generic CRUD paths (list, get, create, update, delete) share the
//! helpers below; resource modules add their own extra endpoints.

pub mod brand;
pub mod category;
pub mod media;

use catalog_core::error::CoreError;
use catalog_core::listing::{Listing, QuerySpec};
use catalog_core::types::DbId;
use catalog_db::resource::Resource;
use catalog_db::{listing, DbPool};

use crate::error::{AppError, AppResult};

/// Raw `?key=value` pairs, decoded in order.
pub type ListParams = Vec<(String, String)>;

/// Run the shared list query for `R` from raw query parameters.
pub(crate) async fn list_resource<R: Resource>(
    pool: &DbPool,
    params: ListParams,
) -> AppResult<Listing<R>> {
    let spec = QuerySpec::from_params(params);
    Ok(listing::list::<R>(pool, &spec).await?)
}

/// Load a live row or fail with 404.
pub(crate) async fn find_or_404<R: Resource>(pool: &DbPool, id: DbId) -> AppResult<R> {
    listing::find_active::<R, _>(pool, id)
        .await?
        .ok_or_else(|| not_found::<R>(id))
}

pub(crate) fn not_found<R: Resource>(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: R::ENTITY,
        id,
    })
}
