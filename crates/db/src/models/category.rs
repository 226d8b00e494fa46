//! Category models and DTOs.

use catalog_core::slug::slugify;
use catalog_core::status::Status;
use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::resource::{Fields, Resource};

/// Column list for `categories` queries.
pub const CATEGORY_COLUMNS: &str = "\
    id, name, slug, description, status, media_id, \
    created_at, updated_at, deleted_at";

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub status: String,
    /// Cover image, a row in `media`.
    pub media_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCategory {
    #[validate(length(min = 2, max = 255), custom(function = "crate::models::validate_sluggable"))]
    pub name: String,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub media_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(length(min = 2, max = 255), custom(function = "crate::models::validate_sluggable"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    pub media_id: Option<DbId>,
}

// ---------------------------------------------------------------------------
// Resource binding
// ---------------------------------------------------------------------------

impl Resource for Category {
    const ENTITY: &'static str = "Category";
    const TABLE: &'static str = "categories";
    const COLUMNS: &'static str = CATEGORY_COLUMNS;
    const SEARCHABLE: &'static [&'static str] = &["name"];
    const SORTABLE: &'static [&'static str] = &["name", "slug", "status", "created_at", "updated_at"];

    type Create = CreateCategory;
    type Update = UpdateCategory;

    fn build(input: &CreateCategory) -> Fields {
        Fields::new()
            .set("name", input.name.as_str())
            .set("slug", slugify(&input.name))
            .set("description", input.description.clone())
            .set("status", input.status.unwrap_or_default())
            .set("media_id", input.media_id)
    }

    fn patch(input: &UpdateCategory) -> Fields {
        Fields::new()
            .set_opt("name", input.name.clone())
            .set_opt("slug", input.name.as_deref().map(slugify))
            .set_opt("description", input.description.clone())
            .set_opt("status", input.status)
            .set_opt("media_id", input.media_id)
    }
}
