//! Values bound to statement placeholders.

use chrono::NaiveDate;
use sqlx::postgres::PgArguments;
use sqlx::query::Query;
use sqlx::Postgres;

/// A positional argument of a built statement.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// SQL NULL (bound as text)
    Null,
    /// Text value
    Text(String),
    /// Double precision value
    Float(f64),
    /// Bigint value
    Integer(i64),
    /// Nullable date
    Date(Option<NaiveDate>),
    /// Text array; cast in SQL when the column is `uuid[]`
    TextArray(Vec<String>),
}

impl SqlValue {
    /// Whether this is the "leave unchanged" value of a partial update.
    pub fn is_zero(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Float(f) => *f == 0.0,
            Self::Integer(i) => *i == 0,
            Self::Date(d) => d.is_none(),
            Self::TextArray(items) => items.is_empty(),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for SqlValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<Option<NaiveDate>> for SqlValue {
    fn from(value: Option<NaiveDate>) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDate> for SqlValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(Some(value))
    }
}

impl From<Vec<String>> for SqlValue {
    fn from(value: Vec<String>) -> Self {
        Self::TextArray(value)
    }
}

impl From<&[String]> for SqlValue {
    fn from(value: &[String]) -> Self {
        Self::TextArray(value.to_vec())
    }
}

/// Bind values to a query in placeholder order.
pub(crate) fn bind_values<'q>(
    query: Query<'q, Postgres, PgArguments>,
    values: Vec<SqlValue>,
) -> Query<'q, Postgres, PgArguments> {
    let mut query = query;
    for value in values {
        query = match value {
            SqlValue::Null => query.bind(None::<String>),
            SqlValue::Text(s) => query.bind(s),
            SqlValue::Float(f) => query.bind(f),
            SqlValue::Integer(i) => query.bind(i),
            SqlValue::Date(d) => query.bind(d),
            SqlValue::TextArray(items) => query.bind(items),
        };
    }
    query
}
