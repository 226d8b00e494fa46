//! List query parameters and pagination math.
//!
//! [`QuerySpec`] is the normalized form of the `?search=&trashed=&sort_by=...`
//! query string every list endpoint accepts. Parsing never fails: bad or
//! missing values fall back to defaults.

use serde::Serialize;

use crate::casing::to_snake_case;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Default page number.
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size.
pub const DEFAULT_PER_PAGE: i64 = 15;

/// Upper bound for `per_page`.
pub const MAX_PER_PAGE: i64 = 500;

/// Default sort column.
pub const DEFAULT_SORT_FIELD: &str = "created_at";

/// The only token accepted as `true` for boolean parameters.
const TRUTHY: &str = "true";

// ---------------------------------------------------------------------------
// QuerySpec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// `asc` in any letter case selects ascending; everything else descends.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Filter, sort and pagination intent for a list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub search: Option<String>,
    /// Only soft-deleted rows when set; only live rows otherwise.
    pub include_trashed: bool,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    /// `None` leaves the choice to the resource.
    pub paginate: Option<bool>,
    pub page: i64,
    pub per_page: i64,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            search: None,
            include_trashed: false,
            sort_field: DEFAULT_SORT_FIELD.to_string(),
            sort_direction: SortDirection::Desc,
            paginate: None,
            page: DEFAULT_PAGE,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl QuerySpec {
    /// Build a spec from raw query parameters.
    ///
    /// Keys may be camelCase or snake_case (`perPage` == `per_page`), and so
    /// may the `sort_by` value (`updatedAt` sorts by `updated_at`).
    /// Unknown keys are ignored. When a key repeats, the last value wins.
    pub fn from_params<I, K, V>(params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut spec = Self::default();

        for (key, value) in params {
            let value = value.as_ref();
            match to_snake_case(key.as_ref()).as_str() {
                "search" => {
                    let term = value.trim();
                    spec.search = (!term.is_empty()).then(|| term.to_string());
                }
                "trashed" => spec.include_trashed = value == TRUTHY,
                "sort_by" => {
                    let field = value.trim();
                    spec.sort_field = if field.is_empty() {
                        DEFAULT_SORT_FIELD.to_string()
                    } else {
                        to_snake_case(field)
                    };
                }
                "sort_direction" => spec.sort_direction = SortDirection::parse(value),
                "paginate" => spec.paginate = Some(value == TRUTHY),
                "page" => spec.page = parse_positive(value).unwrap_or(DEFAULT_PAGE),
                "per_page" => {
                    spec.per_page = parse_positive(value)
                        .unwrap_or(DEFAULT_PER_PAGE)
                        .min(MAX_PER_PAGE);
                }
                _ => {}
            }
        }

        spec
    }

    /// Row offset of the requested page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// `%term%` with LIKE wildcards escaped, or `None` without a search term.
    pub fn search_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|term| format!("%{}%", escape_like(term)))
    }
}

fn parse_positive(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|n| *n > 0)
}

/// Escape `\`, `%` and `_` so a term matches literally under `LIKE`/`ILIKE`.
pub fn escape_like(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// Pagination envelope
// ---------------------------------------------------------------------------

/// Paging metadata returned alongside a page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub total: i64,
    pub per_page: i64,
    pub current_page: i64,
    pub last_page: i64,
}

impl PageMeta {
    /// `last_page` is `ceil(total / per_page)` and never below 1.
    pub fn new(total: i64, per_page: i64, current_page: i64) -> Self {
        let per_page = per_page.max(1);
        let total = total.max(0);
        let last_page = ((total + per_page - 1) / per_page).max(1);
        Self {
            total,
            per_page,
            current_page,
            last_page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub meta: PageMeta,
}

/// Result of a list query: the whole match set, or one page of it.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    All(Vec<T>),
    Page(Page<T>),
}

impl<T> Listing<T> {
    pub fn rows(&self) -> &[T] {
        match self {
            Listing::All(rows) => rows,
            Listing::Page(page) => &page.data,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
