//! Pagination parameter coercion.
//!
//! Query-string values arrive as strings and callers send all sorts of junk:
//! empty strings, words, negative numbers. List endpoints must still paginate
//! with `page=1, limit=10` defaults rather than reject the request, so the
//! deserializer here maps anything unparseable to `None` and the accessors
//! coerce to positive integers.

use serde::{Deserialize, Deserializer};

/// Deserialize an optional query parameter into an optional i64, treating
/// empty or non-numeric input as absent instead of failing the request.
pub fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    Ok(s.and_then(|s| s.trim().parse::<i64>().ok()))
}

/// Effective page number: 1-indexed, minimum 1, default 1.
#[must_use]
pub fn page_or_default(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Effective page size: minimum 1, default 10.
#[must_use]
pub fn limit_or_default(limit: Option<i64>) -> i64 {
    limit.unwrap_or(10).max(1)
}
