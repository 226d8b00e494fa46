//! Generic list query: search, trash view, ordering and pagination.
//!
//! Every resource list endpoint goes through [`list`]. The filter is either
//! the resource's live-row predicate or, with `trashed=true`, its trashed-row
//! predicate. The trashed view never includes live rows.

use catalog_core::listing::{Listing, Page, PageMeta, QuerySpec};
use catalog_core::types::DbId;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder};

use crate::resource::Resource;

/// Run a list query for `R`.
///
/// Returns [`Listing::All`] unless pagination was requested (or is the
/// resource default), in which case the filtered row count is taken first
/// and one page is returned with its metadata. A page past the end yields
/// empty `data` with valid metadata.
pub async fn list<R: Resource>(pool: &PgPool, spec: &QuerySpec) -> Result<Listing<R>, sqlx::Error> {
    let paginate = spec.paginate.unwrap_or(R::PAGINATE_BY_DEFAULT);

    if !paginate {
        let mut qb = select_query::<R>(spec, None);
        let rows = qb.build_query_as::<R>().fetch_all(pool).await?;
        return Ok(Listing::All(rows));
    }

    let mut count = count_query::<R>(spec);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut qb = select_query::<R>(spec, Some((spec.per_page, spec.offset())));
    let data = qb.build_query_as::<R>().fetch_all(pool).await?;

    Ok(Listing::Page(Page {
        data,
        meta: PageMeta::new(total, spec.per_page, spec.page),
    }))
}

/// Find a live row by id.
pub async fn find_active<'e, R, E>(executor: E, id: DbId) -> Result<Option<R>, sqlx::Error>
where
    R: Resource,
    E: PgExecutor<'e>,
{
    let query = format!(
        "SELECT {} FROM {} WHERE {} = $1 AND {}",
        R::COLUMNS,
        R::TABLE,
        R::ID_COLUMN,
        R::base_predicate()
    );
    sqlx::query_as::<_, R>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

// ---------------------------------------------------------------------------
// SQL construction
// ---------------------------------------------------------------------------

/// `SELECT COUNT(*)` over the filtered, unordered set.
pub fn count_query<R: Resource>(spec: &QuerySpec) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", R::TABLE));
    push_filters::<R>(&mut qb, spec);
    qb
}

/// Filtered and ordered select, optionally windowed by `(limit, offset)`.
pub fn select_query<R: Resource>(
    spec: &QuerySpec,
    window: Option<(i64, i64)>,
) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", R::COLUMNS, R::TABLE));
    push_filters::<R>(&mut qb, spec);

    let direction = spec.sort_direction.as_sql();
    qb.push(format!(
        " ORDER BY {} {direction}, {} {direction}",
        quote_ident(R::sort_column(&spec.sort_field)),
        R::ID_COLUMN
    ));

    if let Some((limit, offset)) = window {
        qb.push(" LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);
    }
    qb
}

fn push_filters<R: Resource>(qb: &mut QueryBuilder<'static, Postgres>, spec: &QuerySpec) {
    qb.push(" WHERE ");
    qb.push(if spec.include_trashed {
        R::trashed_predicate()
    } else {
        R::base_predicate()
    });

    let Some(pattern) = spec.search_pattern() else {
        return;
    };
    if R::SEARCHABLE.is_empty() {
        return;
    }

    qb.push(" AND (");
    for (i, column) in R::SEARCHABLE.iter().enumerate() {
        if i > 0 {
            qb.push(" OR ");
        }
        qb.push(*column).push(" ILIKE ").push_bind(pattern.clone());
    }
    qb.push(")");
}

/// Double-quote an identifier, escaping embedded quotes.
pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
