//! WHERE clause predicate trees.

use super::{Expr, SqlValue};

/// Binary comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Like,
    ILike,
}

impl Comparison {
    fn as_sql(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Like => "LIKE",
            Self::ILike => "ILIKE",
        }
    }
}

/// A filter over rows.
///
/// Leaves compare one column against bound values. Column names that are
/// not qualified can be prefixed with a table alias through
/// [`Predicate::qualify`].
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `column <op> ?`, optionally casting the placeholder
    Compare {
        column: String,
        op: Comparison,
        value: SqlValue,
        cast: Option<&'static str>,
    },
    /// `column IN (?, ...)`; an empty list matches nothing
    In { column: String, values: Vec<SqlValue> },
    /// `column IS NULL`
    IsNull(String),
    /// `column IS NOT NULL`
    IsNotNull(String),
    /// Caller-supplied fragment, left untouched by qualification
    Raw(Expr),
    /// Conjunction; empty matches everything
    And(Vec<Predicate>),
    /// Disjunction; empty matches nothing
    Or(Vec<Predicate>),
    /// Negation
    Not(Box<Predicate>),
}

impl Predicate {
    fn compare(column: impl Into<String>, op: Comparison, value: impl Into<SqlValue>) -> Self {
        Self::Compare {
            column: column.into(),
            op,
            value: value.into(),
            cast: None,
        }
    }

    pub fn eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Comparison::Eq, value)
    }

    pub fn not_eq(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Comparison::NotEq, value)
    }

    pub fn lt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Comparison::Lt, value)
    }

    pub fn lte(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Comparison::Lte, value)
    }

    pub fn gt(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Comparison::Gt, value)
    }

    pub fn gte(column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        Self::compare(column, Comparison::Gte, value)
    }

    pub fn like(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::compare(column, Comparison::Like, pattern.into())
    }

    pub fn ilike(column: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self::compare(column, Comparison::ILike, pattern.into())
    }

    /// Equality against a uuid column, binding the id as text.
    pub fn uuid_eq(column: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Compare {
            column: column.into(),
            op: Comparison::Eq,
            value: SqlValue::Text(id.into()),
            cast: Some("uuid"),
        }
    }

    pub fn is_in<V: Into<SqlValue>>(
        column: impl Into<String>,
        values: impl IntoIterator<Item = V>,
    ) -> Self {
        Self::In {
            column: column.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_null(column: impl Into<String>) -> Self {
        Self::IsNull(column.into())
    }

    pub fn is_not_null(column: impl Into<String>) -> Self {
        Self::IsNotNull(column.into())
    }

    pub fn raw(sql: impl Into<String>, args: Vec<SqlValue>) -> Self {
        Self::Raw(Expr::new(sql, args))
    }

    pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self::And(predicates.into_iter().collect())
    }

    pub fn any(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        Self::Or(predicates.into_iter().collect())
    }

    pub fn negate(predicate: Predicate) -> Self {
        Self::Not(Box::new(predicate))
    }

    /// Combine with another predicate, flattening nested conjunctions.
    pub fn and(self, other: Predicate) -> Self {
        match self {
            Self::And(mut items) => {
                items.push(other);
                Self::And(items)
            }
            first => Self::And(vec![first, other]),
        }
    }

    /// Prefix unqualified column names with `alias`.
    pub fn qualify(self, alias: &str) -> Self {
        self.map_columns(&|column: &str| {
            if column.contains('.') {
                column.to_string()
            } else {
                format!("{alias}.{column}")
            }
        })
    }

    /// Rewrite every column name with `resolve`. Raw fragments are kept.
    pub fn map_columns(self, resolve: &dyn Fn(&str) -> String) -> Self {
        match self {
            Self::Compare {
                column,
                op,
                value,
                cast,
            } => Self::Compare {
                column: resolve(&column),
                op,
                value,
                cast,
            },
            Self::In { column, values } => Self::In {
                column: resolve(&column),
                values,
            },
            Self::IsNull(column) => Self::IsNull(resolve(&column)),
            Self::IsNotNull(column) => Self::IsNotNull(resolve(&column)),
            Self::Raw(expr) => Self::Raw(expr),
            Self::And(items) => {
                Self::And(items.into_iter().map(|p| p.map_columns(resolve)).collect())
            }
            Self::Or(items) => Self::Or(items.into_iter().map(|p| p.map_columns(resolve)).collect()),
            Self::Not(inner) => Self::Not(Box::new(inner.map_columns(resolve))),
        }
    }

    /// Render into `sql`, appending bound values to `args`.
    pub fn write_to(&self, sql: &mut String, args: &mut Vec<SqlValue>) {
        match self {
            Self::Compare {
                column,
                op,
                value,
                cast,
            } => {
                sql.push_str(column);
                sql.push(' ');
                sql.push_str(op.as_sql());
                sql.push_str(" ?");
                if let Some(cast) = cast {
                    sql.push_str("::");
                    sql.push_str(cast);
                }
                args.push(value.clone());
            }
            Self::In { values, .. } if values.is_empty() => sql.push_str("FALSE"),
            Self::In { column, values } => {
                sql.push_str(column);
                sql.push_str(" IN (");
                sql.push_str(&vec!["?"; values.len()].join(", "));
                sql.push(')');
                args.extend(values.iter().cloned());
            }
            Self::IsNull(column) => {
                sql.push_str(column);
                sql.push_str(" IS NULL");
            }
            Self::IsNotNull(column) => {
                sql.push_str(column);
                sql.push_str(" IS NOT NULL");
            }
            Self::Raw(expr) => {
                sql.push_str(expr.sql());
                args.extend(expr.args().iter().cloned());
            }
            Self::And(items) => write_group(items, " AND ", "(1=1)", sql, args),
            Self::Or(items) => write_group(items, " OR ", "(1=0)", sql, args),
            Self::Not(inner) => {
                sql.push_str("NOT (");
                inner.write_to(sql, args);
                sql.push(')');
            }
        }
    }

    /// Render to a standalone fragment.
    pub fn to_expr(&self) -> Expr {
        let mut sql = String::new();
        let mut args = Vec::new();
        self.write_to(&mut sql, &mut args);
        Expr::new(sql, args)
    }
}

fn write_group(
    items: &[Predicate],
    separator: &str,
    empty: &str,
    sql: &mut String,
    args: &mut Vec<SqlValue>,
) {
    if items.is_empty() {
        sql.push_str(empty);
        return;
    }
    sql.push('(');
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            sql.push_str(separator);
        }
        item.write_to(sql, args);
    }
    sql.push(')');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparisons() {
        let expr = Predicate::all([
            Predicate::eq("language", "en"),
            Predicate::gte("rating", 3.5),
            Predicate::ilike("title", "%rust%"),
        ])
        .to_expr();

        assert_eq!(expr.sql(), "(language = ? AND rating >= ? AND title ILIKE ?)");
        assert_eq!(
            expr.args(),
            &[
                SqlValue::from("en"),
                SqlValue::Float(3.5),
                SqlValue::from("%rust%")
            ]
        );
    }

    #[test]
    fn test_empty_groups() {
        assert_eq!(Predicate::all([]).to_expr().sql(), "(1=1)");
        assert_eq!(Predicate::any([]).to_expr().sql(), "(1=0)");
        assert_eq!(
            Predicate::is_in("language", Vec::<String>::new()).to_expr().sql(),
            "FALSE"
        );
    }

    #[test]
    fn test_in_and_negation() {
        let expr = Predicate::negate(Predicate::is_in("language", ["en", "de"])).to_expr();
        assert_eq!(expr.sql(), "NOT (language IN (?, ?))");
        assert_eq!(expr.args().len(), 2);
    }

    #[test]
    fn test_uuid_eq_casts_placeholder() {
        let expr = Predicate::uuid_eq("direction_uuid", "d1").to_expr();
        assert_eq!(expr.sql(), "direction_uuid = ?::uuid");
    }

    #[test]
    fn test_qualify_leaves_qualified_and_raw_alone() {
        let predicate = Predicate::eq("title", "Dune")
            .and(Predicate::is_null("au.full_name"))
            .and(Predicate::raw("cardinality(tags_uuids) > ?", vec![SqlValue::Integer(0)]))
            .qualify("b");

        assert_eq!(
            predicate.to_expr().sql(),
            "(b.title = ? AND au.full_name IS NULL AND cardinality(tags_uuids) > ?)"
        );
    }

    #[test]
    fn test_map_columns_reaches_nested_leaves() {
        let predicate = Predicate::negate(Predicate::any(vec![
            Predicate::eq("author_full_name", "Herbert"),
            Predicate::is_in("language", vec!["en", "de"]),
        ]))
        .map_columns(&|column: &str| match column {
            "author_full_name" => "au.full_name".to_string(),
            other => format!("b.{other}"),
        });

        assert_eq!(
            predicate.to_expr().sql(),
            "NOT ((au.full_name = ? OR b.language IN (?, ?)))"
        );
    }

    #[test]
    fn test_and_flattens() {
        let predicate = Predicate::eq("a", 1_i64)
            .and(Predicate::eq("b", 2_i64))
            .and(Predicate::eq("c", 3_i64));
        assert!(matches!(&predicate, Predicate::And(items) if items.len() == 3));
    }
}
