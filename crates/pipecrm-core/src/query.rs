//! Generic filter/search/sort/paginate engine.
//!
//! Every entity list endpoint runs the same four steps over an in-memory
//! snapshot: filter on exact field matches, narrow by a case-insensitive
//! search term, stable-sort by a single key, then slice out one page. The
//! engine is parameterized by a per-entity field table ([`Queryable`]) so the
//! algorithm itself is written exactly once.
//!
//! The engine is deterministic and side-effect free. It never mutates its
//! input and it never fails: malformed specs degrade to "no matches" or
//! "input order", not to errors.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A dynamically-typed view of one record field.
///
/// Records expose their filterable/sortable fields through this type so the
/// engine can compare values without knowing the record's shape.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Date(DateTime<Utc>),
}

impl FieldValue {
    /// Exact-match test used by the filter step.
    ///
    /// Numeric variants compare numerically across `Int`/`Float`. A filter
    /// value of a different type than the field (for example a non-numeric
    /// string filtering a numeric field) matches nothing.
    pub fn matches(&self, filter: &FieldValue) -> bool {
        match (self, filter) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a == b,
            (FieldValue::Float(a), FieldValue::Float(b)) => a == b,
            (FieldValue::Int(a), FieldValue::Float(b)) => (*a as f64) == *b,
            (FieldValue::Float(a), FieldValue::Int(b)) => *a == (*b as f64),
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a == b,
            (FieldValue::Str(a), FieldValue::Str(b)) => a == b,
            (FieldValue::Date(a), FieldValue::Date(b)) => a == b,
            _ => false,
        }
    }

    /// Coerce a raw query parameter meant for a numeric field. Unparseable
    /// input becomes a string value, which a numeric field never matches, so
    /// `?customerId=abc` yields zero matches instead of an error.
    pub fn int_param(raw: &str) -> FieldValue {
        raw.trim()
            .parse::<i64>()
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::Str(raw.to_string()))
    }

    /// Ordering used by the sort step. Dates compare by instant, strings
    /// lexically. Values of incomparable types compare equal so the stable
    /// sort leaves them in input order.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        match (self, other) {
            (FieldValue::Int(a), FieldValue::Int(b)) => a.cmp(b),
            (FieldValue::Float(a), FieldValue::Float(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Int(a), FieldValue::Float(b)) => {
                (*a as f64).partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Float(a), FieldValue::Int(b)) => {
                a.partial_cmp(&(*b as f64)).unwrap_or(Ordering::Equal)
            }
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Str(a), FieldValue::Str(b)) => a.cmp(b),
            (FieldValue::Date(a), FieldValue::Date(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Sort direction for list queries. Serialized as `asc`/`desc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Lenient parse from a raw query parameter: `desc` (any case) selects
    /// descending, everything else — including absence — is ascending.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some(s) if s.eq_ignore_ascii_case("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }
}

/// The normalized representation of a caller's list request.
///
/// `page` and `limit` are kept as given here; [`run_query`] coerces them to a
/// minimum of 1 so a spec built from hostile input still paginates sanely.
#[derive(Debug, Clone)]
pub struct QuerySpec {
    pub filters: Vec<(&'static str, FieldValue)>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
    pub sort_order: SortOrder,
    pub page: i64,
    pub limit: i64,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
            search: None,
            sort_by: None,
            sort_order: SortOrder::Asc,
            page: 1,
            limit: 10,
        }
    }
}

impl QuerySpec {
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            ..Self::default()
        }
    }

    /// Add an exact-match filter. Absent parameters should simply not be
    /// pushed; this keeps "no filter" distinct from "filter on empty".
    pub fn push_filter(&mut self, field: &'static str, value: FieldValue) {
        self.filters.push((field, value));
    }
}

/// One page of a filtered, sorted record set plus totals.
#[derive(Debug, Clone)]
pub struct QueryResult<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

/// Per-entity field table consumed by the engine.
///
/// `field` exposes filterable and sortable fields by their wire name
/// (camelCase, matching the query parameters). `SEARCH_FIELDS` names the
/// string fields scanned by the free-text search step; synthetic fields
/// (such as a contact's combined name) are allowed.
pub trait Queryable {
    const SEARCH_FIELDS: &'static [&'static str];

    fn field(&self, name: &str) -> Option<FieldValue>;
}

/// Run the query pipeline: filter, search, stable sort, paginate.
///
/// `total` and `total_pages` describe the filtered set before slicing, so a
/// page past the end yields empty `items` with correct totals.
pub fn run_query<T>(records: &[T], spec: &QuerySpec) -> QueryResult<T>
where
    T: Queryable + Clone,
{
    let mut rows: Vec<&T> = records.iter().collect();

    for (field, value) in &spec.filters {
        rows.retain(|r| r.field(field).is_some_and(|v| v.matches(value)));
    }

    if let Some(term) = spec.search.as_deref().filter(|t| !t.is_empty()) {
        let needle = term.to_lowercase();
        rows.retain(|r| {
            T::SEARCH_FIELDS.iter().any(|f| match r.field(f) {
                Some(FieldValue::Str(s)) => s.to_lowercase().contains(&needle),
                _ => false,
            })
        });
    }

    if let Some(key) = spec.sort_by.as_deref().filter(|k| !k.is_empty()) {
        // sort_by is stable: equal keys keep their input order under both
        // directions because desc reverses the comparator, not the slice.
        rows.sort_by(|a, b| {
            let ord = match (a.field(key), b.field(key)) {
                (Some(x), Some(y)) => x.compare(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            };
            match spec.sort_order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }

    let total = rows.len() as i64;
    let page = spec.page.max(1);
    let limit = spec.limit.max(1);
    let total_pages = (total + limit - 1) / limit;
    let start = ((page - 1) * limit) as usize;

    let items = rows
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .cloned()
        .collect();

    QueryResult {
        items,
        total,
        page,
        limit,
        total_pages,
    }
}
