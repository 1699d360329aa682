//! Book model and request bodies.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::CatalogError;
use crate::Result;

/// A catalog entry, as persisted in `books.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque unique identifier.
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: String,
    /// Publication year, `0 ..= current calendar year`.
    pub published_year: i64,
    /// Identifier of the user who created the entry. Set once, never
    /// changed by update, and gates update/delete.
    pub user_id: String,
}

impl Book {
    /// Creates a book owned by `user_id`, trimming the string fields.
    pub fn new(
        title: &str,
        author: &str,
        genre: &str,
        published_year: i64,
        user_id: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.trim().to_string(),
            author: author.trim().to_string(),
            genre: genre.trim().to_string(),
            published_year,
            user_id,
        }
    }
}

/// Body for `POST /api/books`.
///
/// `published_year` is kept as raw JSON so a non-numeric value maps to
/// the year validation error rather than a body-decoding failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub published_year: Option<Value>,
}

/// Body for `PUT /api/books/:id`. Any subset of fields; absent or
/// falsy values keep the prior value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub published_year: Option<Value>,
}

/// Current calendar year, the inclusive upper bound for
/// `published_year`.
pub(crate) fn current_year() -> i64 {
    i64::from(Utc::now().year())
}

/// Checks a year against the accepted range.
pub(crate) fn year_in_range(year: i64) -> bool {
    (0..=current_year()).contains(&year)
}

/// Whether a raw JSON value is falsy in the loose sense the update
/// merge uses: `null`, `false`, `0` (including `0.0`), or `""`.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Extracts and validates a year from a raw JSON value.
pub(crate) fn parse_year(value: &Value) -> Result<i64> {
    let year = value.as_i64().ok_or(CatalogError::InvalidYear)?;
    if !year_in_range(year) {
        return Err(CatalogError::InvalidYear);
    }
    Ok(year)
}
