//! Repository for the `brands` table.

use std::collections::BTreeMap;

use catalog_core::status::STATUS_ACTIVE;
use sqlx::PgPool;

use crate::models::brand::{Brand, BrandGroup, BrandSummary, BRAND_COLUMNS};

pub struct BrandRepo;

impl BrandRepo {
    /// Live brands with `status = 'active'`, ordered by name.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Brand>, sqlx::Error> {
        let query = format!(
            "SELECT {BRAND_COLUMNS} FROM brands \
             WHERE deleted_at IS NULL AND status = $1 \
             ORDER BY name, id"
        );
        sqlx::query_as::<_, Brand>(&query)
            .bind(STATUS_ACTIVE)
            .fetch_all(pool)
            .await
    }

    /// Active brands grouped by the uppercase first letter of their name.
    pub async fn list_grouped(pool: &PgPool) -> Result<Vec<BrandGroup>, sqlx::Error> {
        let brands = sqlx::query_as::<_, BrandSummary>(
            "SELECT id, name, slug FROM brands \
             WHERE deleted_at IS NULL AND status = $1 \
             ORDER BY name, id",
        )
        .bind(STATUS_ACTIVE)
        .fetch_all(pool)
        .await?;

        Ok(group_by_letter(brands))
    }
}

/// Bucket brands by first letter, groups ordered by letter.
///
/// Brands keep their incoming order within a group. Empty names are skipped.
pub fn group_by_letter(brands: Vec<BrandSummary>) -> Vec<BrandGroup> {
    let mut groups: BTreeMap<String, Vec<BrandSummary>> = BTreeMap::new();
    for brand in brands {
        let Some(first) = brand.name.chars().next() else {
            continue;
        };
        groups
            .entry(first.to_uppercase().collect())
            .or_default()
            .push(brand);
    }

    groups
        .into_iter()
        .map(|(letter, brands)| BrandGroup { letter, brands })
        .collect()
}
