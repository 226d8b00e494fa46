//! Per-resource table metadata used by the generic list and mutation paths.
//!
//! Each catalog entity implements [`Resource`] once; [`crate::listing`] and
//! [`crate::mutation`] then provide search, paging, soft delete and
//! transactional writes without resource-specific SQL.

use catalog_core::status::Status;
use catalog_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Postgres, QueryBuilder};

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// A single column value to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    NullableText(Option<String>),
    BigInt(i64),
    Id(DbId),
    NullableId(Option<DbId>),
}

impl FieldValue {
    pub(crate) fn push_bind(self, qb: &mut QueryBuilder<'static, Postgres>) {
        match self {
            FieldValue::Text(v) => qb.push_bind(v),
            FieldValue::NullableText(v) => qb.push_bind(v),
            FieldValue::BigInt(v) => qb.push_bind(v),
            FieldValue::Id(v) => qb.push_bind(v),
            FieldValue::NullableId(v) => qb.push_bind(v),
        };
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&str> for FieldValue {
    fn from(v: &str) -> Self {
        FieldValue::Text(v.to_string())
    }
}

impl From<Option<String>> for FieldValue {
    fn from(v: Option<String>) -> Self {
        FieldValue::NullableText(v)
    }
}

impl From<i64> for FieldValue {
    fn from(v: i64) -> Self {
        FieldValue::BigInt(v)
    }
}

impl From<DbId> for FieldValue {
    fn from(v: DbId) -> Self {
        FieldValue::Id(v)
    }
}

impl From<Option<DbId>> for FieldValue {
    fn from(v: Option<DbId>) -> Self {
        FieldValue::NullableId(v)
    }
}

impl From<Status> for FieldValue {
    fn from(v: Status) -> Self {
        FieldValue::Text(v.as_str().to_string())
    }
}

// ---------------------------------------------------------------------------
// Fields
// ---------------------------------------------------------------------------

/// Ordered `column -> value` set for an INSERT or a partial UPDATE.
///
/// Only columns that were explicitly set are written. Setting a column twice
/// replaces the earlier value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<(&'static str, FieldValue)>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, column: &'static str, value: impl Into<FieldValue>) -> Self {
        let value = value.into();
        match self.0.iter_mut().find(|(c, _)| *c == column) {
            Some(slot) => slot.1 = value,
            None => self.0.push((column, value)),
        }
        self
    }

    /// Set `column` only when `value` is present.
    pub fn set_opt<V: Into<FieldValue>>(self, column: &'static str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.set(column, v),
            None => self,
        }
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.0.iter().find(|(c, _)| *c == column).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(c, _)| *c)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn into_values(self) -> impl Iterator<Item = (&'static str, FieldValue)> {
        self.0.into_iter()
    }
}

// ---------------------------------------------------------------------------
// Resource
// ---------------------------------------------------------------------------

/// A soft-deletable catalog table.
pub trait Resource: for<'r> FromRow<'r, PgRow> + Send + Sync + Unpin + 'static {
    /// Name used in error messages ("Brand", "Media", ...).
    const ENTITY: &'static str;
    const TABLE: &'static str;
    const ID_COLUMN: &'static str = "id";
    /// Select list for every read.
    const COLUMNS: &'static str;
    /// Columns matched case-insensitively by the `search` parameter.
    const SEARCHABLE: &'static [&'static str];
    /// Columns accepted by `sort_by`. Empty accepts any column name.
    const SORTABLE: &'static [&'static str] = &[];
    const PAGINATE_BY_DEFAULT: bool = false;

    type Create: Sync;
    type Update: Sync;

    fn base_predicate() -> &'static str {
        "deleted_at IS NULL"
    }

    fn trashed_predicate() -> &'static str {
        "deleted_at IS NOT NULL"
    }

    /// Full column set for a new row. The id column is added by the caller.
    fn build(input: &Self::Create) -> Fields;

    /// Columns to change for a partial update; absent inputs are skipped.
    fn patch(input: &Self::Update) -> Fields;

    /// Column to order by for a requested sort field.
    fn sort_column(requested: &str) -> &str {
        if Self::SORTABLE.is_empty() || Self::SORTABLE.contains(&requested) {
            requested
        } else {
            catalog_core::listing::DEFAULT_SORT_FIELD
        }
    }
}
