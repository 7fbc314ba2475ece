//! SQL statement composition.
//!
//! Builders assemble statement text with `?` placeholders and collect the
//! bound arguments in order. The placeholder formatter turns the finished
//! text into the `$1, $2, ...` form PostgreSQL expects.
//!
//! Nothing here validates identifiers. Column, table, join and ORDER BY text
//! is copied into the statement as given; only values travel as arguments.

mod builder;
mod placeholder;
mod predicate;
mod value;

pub use builder::{DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
pub use placeholder::{count_placeholders, PlaceholderFormat};
pub use predicate::{Comparison, Predicate};
pub use value::SqlValue;

pub(crate) use value::bind_values;

/// A SQL fragment together with the values its placeholders consume.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    sql: String,
    args: Vec<SqlValue>,
}

impl Expr {
    /// Fragment with arguments, one per `?` in `sql`.
    pub fn new(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self {
            sql: sql.into(),
            args,
        }
    }

    /// Fragment without arguments.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new())
    }

    /// A single bound value.
    pub fn bind(value: impl Into<SqlValue>) -> Self {
        Self::new("?", vec![value.into()])
    }

    /// Fragment text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound values in placeholder order.
    pub fn args(&self) -> &[SqlValue] {
        &self.args
    }

    pub(crate) fn into_parts(self) -> (String, Vec<SqlValue>) {
        (self.sql, self.args)
    }
}

/// A finished statement ready to be bound and executed.
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    /// Statement text in the target placeholder format
    pub sql: String,
    /// Bound values in placeholder order
    pub args: Vec<SqlValue>,
}

impl Statement {
    /// Format `raw_sql` for the target dialect.
    ///
    /// Arguments are not checked against the placeholders. A raw fragment
    /// with a stray `?` makes the database reject the statement, which
    /// surfaces as a database error when it runs.
    pub(crate) fn new(raw_sql: &str, args: Vec<SqlValue>, format: PlaceholderFormat) -> Self {
        Self {
            sql: format.format(raw_sql),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expr_bind() {
        let expr = Expr::bind("fiction");
        assert_eq!(expr.sql(), "?");
        assert_eq!(expr.args(), &[SqlValue::Text("fiction".to_string())]);
    }

    #[test]
    fn test_statement_formats_placeholders() {
        let statement = Statement::new(
            "UPDATE books SET rating = ? WHERE id = ?::uuid",
            vec![SqlValue::Float(4.0), SqlValue::from("b1")],
            PlaceholderFormat::Dollar,
        );
        assert_eq!(statement.sql, "UPDATE books SET rating = $1 WHERE id = $2::uuid");
        assert_eq!(statement.args.len(), 2);
    }

    #[test]
    fn test_statement_with_stray_placeholder_does_not_panic() {
        let raw = "SELECT * FROM tags WHERE name = ? ORDER BY name?";
        assert_eq!(count_placeholders(raw), 2);

        let statement = Statement::new(raw, vec![SqlValue::from("x")], PlaceholderFormat::Dollar);
        assert_eq!(statement.sql, "SELECT * FROM tags WHERE name = $1 ORDER BY name$2");
        assert_eq!(statement.args.len(), 1);
    }
}
