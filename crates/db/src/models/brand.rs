//! Brand models and DTOs.

use catalog_core::slug::slugify;
use catalog_core::status::Status;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::resource::{Fields, Resource};

/// Column list for `brands` queries.
pub const BRAND_COLUMNS: &str = "id, name, slug, status, created_at, updated_at, deleted_at";

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `brands` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Brand {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// The `id, name, slug` projection used by the grouped listing.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BrandSummary {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

/// Active brands sharing an uppercase first letter.
#[derive(Debug, Clone, Serialize)]
pub struct BrandGroup {
    pub letter: String,
    pub brands: Vec<BrandSummary>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBrand {
    #[validate(length(min = 2, max = 100), custom(function = "crate::models::validate_sluggable"))]
    pub name: String,
    /// Defaults to `active`.
    pub status: Option<Status>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBrand {
    #[validate(length(min = 2, max = 100), custom(function = "crate::models::validate_sluggable"))]
    pub name: Option<String>,
    pub status: Option<Status>,
}

// ---------------------------------------------------------------------------
// Resource binding
// ---------------------------------------------------------------------------

impl Resource for Brand {
    const ENTITY: &'static str = "Brand";
    const TABLE: &'static str = "brands";
    const COLUMNS: &'static str = BRAND_COLUMNS;
    const SEARCHABLE: &'static [&'static str] = &["name"];
    const SORTABLE: &'static [&'static str] = &["name", "slug", "status", "created_at", "updated_at"];

    type Create = CreateBrand;
    type Update = UpdateBrand;

    fn build(input: &CreateBrand) -> Fields {
        Fields::new()
            .set("name", input.name.as_str())
            .set("slug", slugify(&input.name))
            .set("status", input.status.unwrap_or_default())
    }

    fn patch(input: &UpdateBrand) -> Fields {
        Fields::new()
            .set_opt("name", input.name.clone())
            .set_opt("slug", input.name.as_deref().map(slugify))
            .set_opt("status", input.status)
    }
}
