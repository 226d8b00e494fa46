//! Media models and DTOs.

use catalog_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::resource::{Fields, Resource};

/// Column list for `media` queries.
pub const MEDIA_COLUMNS: &str = "\
    id, file_id, file_name, url, thumb_url, file_type, size, description, \
    created_at, updated_at, deleted_at";

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `media` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Media {
    pub id: DbId,
    /// Identifier of the file at the storage provider.
    pub file_id: String,
    pub file_name: String,
    pub url: String,
    pub thumb_url: Option<String>,
    pub file_type: String,
    /// Size in bytes.
    pub size: i64,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateMedia {
    #[validate(length(min = 1))]
    pub file_id: String,
    #[validate(length(min = 1, max = 255))]
    pub file_name: String,
    #[validate(url)]
    pub url: String,
    #[validate(url)]
    pub thumb_url: Option<String>,
    #[validate(length(min = 1))]
    pub file_type: String,
    #[validate(range(min = 1))]
    pub size: i64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateMedia {
    #[validate(length(min = 1))]
    pub file_id: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub file_name: Option<String>,
    #[validate(url)]
    pub url: Option<String>,
    #[validate(url)]
    pub thumb_url: Option<String>,
    #[validate(length(min = 1))]
    pub file_type: Option<String>,
    #[validate(range(min = 1))]
    pub size: Option<i64>,
    pub description: Option<String>,
}

/// Body of `POST /media/upload-url`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UploadFromUrl {
    #[validate(url)]
    pub url: String,
    /// Defaults to the last path segment of `url`.
    pub file_name: Option<String>,
}

// ---------------------------------------------------------------------------
// Resource binding
// ---------------------------------------------------------------------------

impl Resource for Media {
    const ENTITY: &'static str = "Media";
    const TABLE: &'static str = "media";
    const COLUMNS: &'static str = MEDIA_COLUMNS;
    const SEARCHABLE: &'static [&'static str] = &["file_name"];
    const SORTABLE: &'static [&'static str] =
        &["file_name", "file_type", "size", "created_at", "updated_at"];

    type Create = CreateMedia;
    type Update = UpdateMedia;

    fn build(input: &CreateMedia) -> Fields {
        Fields::new()
            .set("file_id", input.file_id.as_str())
            .set("file_name", input.file_name.as_str())
            .set("url", input.url.as_str())
            .set("thumb_url", input.thumb_url.clone())
            .set("file_type", input.file_type.as_str())
            .set("size", input.size)
            .set("description", input.description.clone())
    }

    fn patch(input: &UpdateMedia) -> Fields {
        Fields::new()
            .set_opt("file_id", input.file_id.clone())
            .set_opt("file_name", input.file_name.clone())
            .set_opt("url", input.url.clone())
            .set_opt("thumb_url", input.thumb_url.clone())
            .set_opt("file_type", input.file_type.clone())
            .set_opt("size", input.size)
            .set_opt("description", input.description.clone())
    }
}
