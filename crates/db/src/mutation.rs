//! Transactional single-row writes shared by every resource.
//!
//! Each write runs inside its own `sqlx::Transaction`. Any early return,
//! propagated error or dropped future before `commit` leaves the transaction
//! to roll back when it is dropped, so no partial state becomes visible.

use catalog_core::types::{new_id, DbId};
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::listing::find_active;
use crate::resource::{Fields, Resource};

/// Insert a new row with a freshly generated id and return it.
pub async fn create<R: Resource>(pool: &PgPool, input: &R::Create) -> Result<R, sqlx::Error> {
    let id = new_id();
    let mut qb = insert_query::<R>(id, R::build(input));

    let mut tx = pool.begin().await?;
    let row = qb.build_query_as::<R>().fetch_one(&mut *tx).await?;
    tx.commit().await?;

    tracing::debug!(entity = R::ENTITY, %id, "Row inserted");
    Ok(row)
}

/// Apply a partial update to a live row and return the row as stored.
///
/// Returns `None` if no live row has this id. Columns absent from the patch
/// are left untouched. The row is re-read after commit so trigger-maintained
/// columns such as `updated_at` are current.
pub async fn update<R: Resource>(
    pool: &PgPool,
    id: DbId,
    input: &R::Update,
) -> Result<Option<R>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    if find_active::<R, _>(&mut *tx, id).await?.is_none() {
        return Ok(None);
    }

    let fields = R::patch(input);
    if !fields.is_empty() {
        let mut qb = update_query::<R>(id, fields);
        qb.build().execute(&mut *tx).await?;
    }
    tx.commit().await?;

    find_active::<R, _>(pool, id).await
}

/// Mark a live row as deleted.
///
/// Only `deleted_at` is written. Returns `false` if no live row had this id,
/// which makes a second call a no-op.
pub async fn soft_delete<R: Resource>(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
    let query = format!(
        "UPDATE {} SET deleted_at = NOW() WHERE {} = $1 AND {}",
        R::TABLE,
        R::ID_COLUMN,
        R::base_predicate()
    );

    let mut tx = pool.begin().await?;
    let result = sqlx::query(&query).bind(id).execute(&mut *tx).await?;
    tx.commit().await?;

    Ok(result.rows_affected() > 0)
}

// ---------------------------------------------------------------------------
// SQL construction
// ---------------------------------------------------------------------------

fn insert_query<R: Resource>(id: DbId, fields: Fields) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("INSERT INTO {} ({}", R::TABLE, R::ID_COLUMN));
    for column in fields.columns() {
        qb.push(", ").push(column);
    }

    qb.push(") VALUES (").push_bind(id);
    for (_, value) in fields.into_values() {
        qb.push(", ");
        value.push_bind(&mut qb);
    }
    qb.push(format!(") RETURNING {}", R::COLUMNS));
    qb
}

fn update_query<R: Resource>(id: DbId, fields: Fields) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("UPDATE {} SET ", R::TABLE));
    for (i, (column, value)) in fields.into_values().enumerate() {
        if i > 0 {
            qb.push(", ");
        }
        qb.push(column).push(" = ");
        value.push_bind(&mut qb);
    }
    qb.push(format!(" WHERE {} = ", R::ID_COLUMN))
        .push_bind(id)
        .push(format!(" AND {}", R::base_predicate()));
    qb
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::brand::{Brand, CreateBrand, UpdateBrand};

    #[test]
    fn insert_lists_id_then_built_columns() {
        let input = CreateBrand {
            name: "Acme".to_string(),
            status: None,
        };
        let qb = insert_query::<Brand>(new_id(), Brand::build(&input));
        assert!(qb
            .sql()
            .starts_with("INSERT INTO brands (id, name, slug, status) VALUES ($1, $2, $3, $4) RETURNING "));
    }

    #[test]
    fn update_sets_only_patched_columns() {
        let input = UpdateBrand {
            name: None,
            status: Some(catalog_core::status::Status::Inactive),
        };
        let qb = update_query::<Brand>(new_id(), Brand::patch(&input));
        assert_eq!(
            qb.sql(),
            "UPDATE brands SET status = $1 WHERE id = $2 AND deleted_at IS NULL"
        );
    }
}
