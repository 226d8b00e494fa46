//! Integration tests for transactional create, partial update and soft delete.

use catalog_core::status::Status;
use catalog_db::listing::find_active;
use catalog_db::models::brand::{Brand, CreateBrand, UpdateBrand};
use catalog_db::models::category::{Category, CreateCategory};
use catalog_db::models::media::{CreateMedia, Media};
use catalog_db::mutation;
use sqlx::PgPool;

fn new_brand(name: &str) -> CreateBrand {
    CreateBrand {
        name: name.to_string(),
        status: None,
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_assigns_id_and_defaults(pool: PgPool) {
    let brand = mutation::create::<Brand>(&pool, &new_brand("Acme")).await.unwrap();

    assert_eq!(brand.id.get_version_num(), 7);
    assert_eq!(brand.name, "Acme");
    assert_eq!(brand.slug, "acme");
    assert_eq!(brand.status, "active");
    assert!(brand.deleted_at.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_slug_rolls_back(pool: PgPool) {
    mutation::create::<Brand>(&pool, &new_brand("Acme")).await.unwrap();

    let err = mutation::create::<Brand>(&pool, &new_brand("ACME")).await.unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM brands")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_trashed_brand_frees_its_slug(pool: PgPool) {
    let first = mutation::create::<Brand>(&pool, &new_brand("Acme")).await.unwrap();
    mutation::soft_delete::<Brand>(&pool, first.id).await.unwrap();

    let second = mutation::create::<Brand>(&pool, &new_brand("Acme")).await.unwrap();
    assert_eq!(second.slug, "acme");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_category_references_media(pool: PgPool) {
    let media = mutation::create::<Media>(
        &pool,
        &CreateMedia {
            file_id: "f1".to_string(),
            file_name: "cover.jpg".to_string(),
            url: "https://ik.example.com/cover.jpg".to_string(),
            thumb_url: None,
            file_type: "jpg".to_string(),
            size: 10,
            description: None,
        },
    )
    .await
    .unwrap();

    let category = mutation::create::<Category>(
        &pool,
        &CreateCategory {
            name: "Skin Care".to_string(),
            description: Some("Face and body".to_string()),
            status: Some(Status::Inactive),
            media_id: Some(media.id),
        },
    )
    .await
    .unwrap();

    assert_eq!(category.media_id, Some(media.id));
    assert_eq!(category.status, "inactive");
    assert_eq!(category.slug, "skin-care");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_preserves_other_fields(pool: PgPool) {
    let brand = mutation::create::<Brand>(
        &pool,
        &CreateBrand {
            name: "Acme".to_string(),
            status: Some(Status::Inactive),
        },
    )
    .await
    .unwrap();

    let updated = mutation::update::<Brand>(
        &pool,
        brand.id,
        &UpdateBrand {
            name: Some("X-Brand".to_string()),
            status: None,
        },
    )
    .await
    .unwrap()
    .expect("brand should exist");

    assert_eq!(updated.id, brand.id);
    assert_eq!(updated.name, "X-Brand");
    assert_eq!(updated.slug, "x-brand");
    assert_eq!(updated.status, "inactive");
    assert_eq!(updated.created_at, brand.created_at);
    assert!(updated.updated_at >= brand.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_empty_patch_returns_current_row(pool: PgPool) {
    let brand = mutation::create::<Brand>(&pool, &new_brand("Acme")).await.unwrap();

    let same = mutation::update::<Brand>(&pool, brand.id, &UpdateBrand::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(same.name, "Acme");
    assert_eq!(same.updated_at, brand.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_missing_row_returns_none(pool: PgPool) {
    let result = mutation::update::<Brand>(
        &pool,
        catalog_core::types::new_id(),
        &UpdateBrand::default(),
    )
    .await
    .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_trashed_row_returns_none(pool: PgPool) {
    let brand = mutation::create::<Brand>(&pool, &new_brand("Acme")).await.unwrap();
    mutation::soft_delete::<Brand>(&pool, brand.id).await.unwrap();

    let result = mutation::update::<Brand>(
        &pool,
        brand.id,
        &UpdateBrand {
            name: Some("Revived".to_string()),
            status: None,
        },
    )
    .await
    .unwrap();
    assert!(result.is_none());

    let name: String = sqlx::query_scalar("SELECT name FROM brands WHERE id = $1")
        .bind(brand.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(name, "Acme");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_conflicting_update_leaves_row_unchanged(pool: PgPool) {
    mutation::create::<Brand>(&pool, &new_brand("Acme")).await.unwrap();
    let globex = mutation::create::<Brand>(&pool, &new_brand("Globex")).await.unwrap();

    let err = mutation::update::<Brand>(
        &pool,
        globex.id,
        &UpdateBrand {
            name: Some("ACME".to_string()),
            status: Some(Status::Inactive),
        },
    )
    .await
    .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));

    let reread = find_active::<Brand, _>(&pool, globex.id).await.unwrap().unwrap();
    assert_eq!(reread.name, "Globex");
    assert_eq!(reread.slug, "globex");
    assert_eq!(reread.status, "active");
    assert_eq!(reread.updated_at, globex.updated_at);
}

// ---------------------------------------------------------------------------
// Find
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_active_by_id(pool: PgPool) {
    let brand = mutation::create::<Brand>(&pool, &new_brand("Acme")).await.unwrap();

    let found: Option<Brand> = find_active::<Brand, _>(&pool, brand.id).await.unwrap();
    assert_eq!(found.map(|b| b.name).as_deref(), Some("Acme"));
}
