//! Filter predicates understood by every producer source.
//!
//! A lookup always issues exactly one of these: no filter, an exact match on
//! one column, or a case-insensitive substring match on one column.

use std::fmt;

use serde_json::Value;

use crate::models::ProducerRecord;

/// Right-hand side of an equality filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    All,
    Eq {
        field: &'static str,
        value: FilterValue,
    },
    /// Case-insensitive substring match. The pattern is sent to `PostgREST`
    /// unescaped, so `%`, `_` and `*` act as wildcards there, while
    /// [`Filter::matches`] compares them literally.
    ILike {
        field: &'static str,
        pattern: String,
    },
}

impl Filter {
    #[must_use]
    pub fn equals(field: &'static str, value: impl Into<FilterValue>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    #[must_use]
    pub fn ilike(field: &'static str, pattern: impl Into<String>) -> Self {
        Self::ILike {
            field,
            pattern: pattern.into(),
        }
    }

    /// Evaluates the predicate against a record held in memory.
    ///
    /// Column values are compared through their text form, the same coercion
    /// the database applies when a filter arrives as a query-string literal.
    /// A missing or `null` column never matches.
    #[must_use]
    pub fn matches(&self, record: &ProducerRecord) -> bool {
        match self {
            Self::All => true,
            Self::Eq { field, value } => {
                column_text(record, field).is_some_and(|text| text == value.to_string())
            }
            Self::ILike { field, pattern } => column_text(record, field)
                .is_some_and(|text| text.to_lowercase().contains(&pattern.to_lowercase())),
        }
    }
}

fn column_text(record: &ProducerRecord, field: &str) -> Option<String> {
    match record.get(field)? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}
