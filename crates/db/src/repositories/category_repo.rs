//! Repository for the `categories` table.

use catalog_core::status::STATUS_ACTIVE;
use sqlx::PgPool;

use crate::models::category::{Category, CATEGORY_COLUMNS};

pub struct CategoryRepo;

impl CategoryRepo {
    /// Live categories with `status = 'active'`, ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE deleted_at IS NULL AND status = $1 \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// Live categories with the given slug, any status. Empty when none match.
    pub async fn find_by_slug(pool: &PgPool, slug: &str) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories \
             WHERE slug = $1 AND deleted_at IS NULL"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(slug)
            .fetch_all(pool)
            .await
    }
}
