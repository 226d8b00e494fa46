//! Postgres persistence for the catalog service.
//!
//! - [`resource`]: per-resource table metadata and field mapping
//! - [`listing`]: the shared search / sort / paginate / trash query
//! - [`mutation`]: transactional create, patch and soft delete
//! - [`models`]: row structs and request DTOs
//! - [`repositories`]: resource-specific queries

use sqlx::postgres::PgPoolOptions;

pub mod listing;
pub mod models;
pub mod mutation;
pub mod repositories;
pub mod resource;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Run `SELECT 1` against the pool.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
