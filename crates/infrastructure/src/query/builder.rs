//! Statement builders.

use super::{Expr, PlaceholderFormat, Predicate, SqlValue, Statement};

fn push_where(filter: Option<Predicate>, sql: &mut String, args: &mut Vec<SqlValue>) {
    if let Some(filter) = filter {
        sql.push_str(" WHERE ");
        filter.write_to(sql, args);
    }
}

/// Builder for SELECT statements.
///
/// ```
/// use catalog_infrastructure::query::{Predicate, SelectBuilder};
///
/// let statement = SelectBuilder::new()
///     .columns(["b.title", "b.rating"])
///     .from("books b")
///     .filter(Predicate::gt("b.rating", 4.0))
///     .order_by("b.rating DESC")
///     .limit(10)
///     .build();
///
/// assert_eq!(
///     statement.sql,
///     "SELECT b.title, b.rating FROM books b WHERE b.rating > $1 ORDER BY b.rating DESC LIMIT 10"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct SelectBuilder {
    columns: Vec<String>,
    from: String,
    joins: Vec<String>,
    filter: Option<Predicate>,
    group_by: Vec<String>,
    order_by: Vec<String>,
    limit: Option<u64>,
    offset: Option<u64>,
    format: PlaceholderFormat,
}

impl SelectBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn column(mut self, column: impl Into<String>) -> Self {
        self.columns.push(column.into());
        self
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Source table, optionally followed by an alias (`"books b"`).
    pub fn from(mut self, source: impl Into<String>) -> Self {
        self.from = source.into();
        self
    }

    pub fn join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("JOIN {table} ON {on}"));
        self
    }

    pub fn left_join(mut self, table: &str, on: &str) -> Self {
        self.joins.push(format!("LEFT JOIN {table} ON {on}"));
        self
    }

    /// Add a WHERE condition, AND-ed with any previous one.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.group_by.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Raw ORDER BY term, copied verbatim into the statement.
    pub fn order_by(mut self, term: impl Into<String>) -> Self {
        self.order_by.push(term.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn build(self) -> Statement {
        let mut args = Vec::new();
        let mut sql = String::from("SELECT ");

        if self.columns.is_empty() {
            sql.push('*');
        } else {
            sql.push_str(&self.columns.join(", "));
        }
        sql.push_str(" FROM ");
        sql.push_str(&self.from);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        push_where(self.filter, &mut sql, &mut args);

        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }
        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {limit}"));
        }
        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {offset}"));
        }

        Statement::new(&sql, args, self.format)
    }
}

/// Builder for INSERT statements.
///
/// Without guards the statement uses a VALUES list. With guards it becomes
/// `INSERT ... SELECT <values> WHERE <guards>`, which inserts nothing when a
/// guard fails.
#[derive(Debug, Clone, Default)]
pub struct InsertBuilder {
    table: String,
    columns: Vec<String>,
    values: Vec<Expr>,
    guards: Vec<Predicate>,
    returning: Option<String>,
    format: PlaceholderFormat,
}

impl InsertBuilder {
    pub fn into_table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn value(mut self, column: impl Into<String>, value: Expr) -> Self {
        self.columns.push(column.into());
        self.values.push(value);
        self
    }

    pub fn guard(mut self, predicate: Predicate) -> Self {
        self.guards.push(predicate);
        self
    }

    pub fn returning(mut self, columns: impl Into<String>) -> Self {
        self.returning = Some(columns.into());
        self
    }

    pub fn build(self) -> Statement {
        let mut args = Vec::new();
        let mut sql = format!("INSERT INTO {} ({})", self.table, self.columns.join(", "));

        let mut exprs = Vec::with_capacity(self.values.len());
        for value in self.values {
            let (text, mut values) = value.into_parts();
            exprs.push(text);
            args.append(&mut values);
        }

        if self.guards.is_empty() {
            sql.push_str(&format!(" VALUES ({})", exprs.join(", ")));
        } else {
            sql.push_str(&format!(" SELECT {}", exprs.join(", ")));
            push_where(Some(Predicate::all(self.guards)), &mut sql, &mut args);
        }

        if let Some(returning) = self.returning {
            sql.push_str(" RETURNING ");
            sql.push_str(&returning);
        }

        Statement::new(&sql, args, self.format)
    }
}

/// Builder for UPDATE statements.
#[derive(Debug, Clone, Default)]
pub struct UpdateBuilder {
    table: String,
    assignments: Vec<(String, Expr)>,
    filter: Option<Predicate>,
    format: PlaceholderFormat,
}

impl UpdateBuilder {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn set(mut self, column: impl Into<String>, value: Expr) -> Self {
        self.assignments.push((column.into(), value));
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn build(self) -> Statement {
        let mut args = Vec::new();
        let mut sql = format!("UPDATE {} SET ", self.table);

        for (i, (column, value)) in self.assignments.into_iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            let (text, mut values) = value.into_parts();
            sql.push_str(&format!("{column} = {text}"));
            args.append(&mut values);
        }

        push_where(self.filter, &mut sql, &mut args);
        Statement::new(&sql, args, self.format)
    }
}

/// Builder for DELETE statements.
#[derive(Debug, Clone, Default)]
pub struct DeleteBuilder {
    table: String,
    filter: Option<Predicate>,
    format: PlaceholderFormat,
}

impl DeleteBuilder {
    pub fn table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Default::default()
        }
    }

    pub fn placeholder_format(mut self, format: PlaceholderFormat) -> Self {
        self.format = format;
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn build(self) -> Statement {
        let mut args = Vec::new();
        let mut sql = format!("DELETE FROM {}", self.table);
        push_where(self.filter, &mut sql, &mut args);
        Statement::new(&sql, args, self.format)
    }
}
