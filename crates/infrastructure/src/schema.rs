//! Table metadata and statement generation.
//!
//! Every repository describes its table once as an [`EntitySchema`]: the
//! table name, an alias and the typed column list. All statements the
//! repositories run are generated from that description, so the
//! partial-update and reference-guard rules live in one place.
//!
//! Identifiers are handled as text in Rust and cast to `uuid` in SQL.

use catalog_common::pagination::{PageRequest, SortParams};

use crate::query::{
    DeleteBuilder, Expr, InsertBuilder, Predicate, SelectBuilder, SqlValue, Statement,
    UpdateBuilder,
};

/// Table holding the tags referenced by `tags_uuids` arrays.
pub const TAGS_TABLE: &str = "tags";

/// Alias of the tags table when joined into a listing.
const TAG_JOIN_ALIAS: &str = "t";

/// Name of the window column carrying the unpaginated row count.
pub const TOTAL_COUNT_COLUMN: &str = "total_count";

/// Name of the aggregated tag column.
pub const TAGS_COLUMN: &str = "tags";

/// A single-row reference to another table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    /// Referenced table
    pub table: &'static str,
    /// Alias used when joining it
    pub alias: &'static str,
    /// Column selected next to the referenced id
    pub label: &'static str,
    /// Prefix of the selected columns: `<prefix>_id`, `<prefix>_<label>`
    pub prefix: &'static str,
}

impl Reference {
    /// Output column carrying the referenced id.
    pub fn id_column(&self) -> String {
        format!("{}_id", self.prefix)
    }

    /// Output column carrying the referenced label.
    pub fn label_column(&self) -> String {
        format!("{}_{}", self.prefix, self.label)
    }
}

pub const AUTHOR_REFERENCE: Reference = Reference {
    table: "authors",
    alias: "au",
    label: "full_name",
    prefix: "author",
};

pub const DIRECTION_REFERENCE: Reference = Reference {
    table: "directions",
    alias: "d",
    label: "name",
    prefix: "direction",
};

/// How a column is written and read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Text; empty means unchanged on update
    Text,
    /// Double precision; zero means unchanged on update
    Float,
    /// Nullable date; NULL means unchanged on update
    Date,
    /// Unchecked uuid stored from text
    Uuid,
    /// Counter maintained by dedicated statements only
    Counter,
    /// Checked uuid reference to another table
    Reference(Reference),
    /// Checked `uuid[]` of tag ids
    Tags,
}

/// A column of an entity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnKind,
}

const fn column(name: &'static str, kind: ColumnKind) -> Column {
    Column { name, kind }
}

/// Column values destined for an insert or update, keyed by column name.
///
/// Columns absent from the record are left out of the statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<(&'static str, SqlValue)>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a column value, replacing an earlier one.
    pub fn with(mut self, column: &'static str, value: impl Into<SqlValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: &'static str, value: impl Into<SqlValue>) {
        let value = value.into();
        match self.values.iter_mut().find(|(name, _)| *name == column) {
            Some(slot) => slot.1 = value,
            None => self.values.push((column, value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.values
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| value)
    }

    /// Columns an update would actually change.
    pub fn changed_columns(&self) -> Vec<&'static str> {
        self.values
            .iter()
            .filter(|(_, value)| !value.is_zero())
            .map(|(name, _)| *name)
            .collect()
    }
}

/// Table description of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    /// Entity name used in errors and logs
    pub entity: &'static str,
    pub table: &'static str,
    pub alias: &'static str,
    /// Columns besides the `id` primary key
    pub columns: &'static [Column],
}

fn tags_exist(array_sql: &str) -> String {
    format!(
        "NOT EXISTS(SELECT 1 FROM unnest({array_sql}) AS x(id) \
         WHERE NOT EXISTS(SELECT 1 FROM {TAGS_TABLE} WHERE id = x.id))"
    )
}

impl EntitySchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        name == "id" || self.column(name).is_some()
    }

    fn has_tags(&self) -> bool {
        self.columns.iter().any(|c| c.kind == ColumnKind::Tags)
    }

    /// Base SELECT with every column, reference join and tag aggregate.
    fn select(&self) -> SelectBuilder {
        let a = self.alias;
        let mut builder = SelectBuilder::new()
            .from(format!("{} {}", self.table, a))
            .column(format!("{a}.id::text AS id"));
        let mut group_by = vec![format!("{a}.id")];

        for column in self.columns {
            let name = column.name;
            match column.kind {
                ColumnKind::Text
                | ColumnKind::Float
                | ColumnKind::Date
                | ColumnKind::Counter => {
                    builder = builder.column(format!("{a}.{name}"));
                    group_by.push(format!("{a}.{name}"));
                }
                ColumnKind::Uuid => {
                    builder = builder.column(format!("{a}.{name}::text AS {name}"));
                    group_by.push(format!("{a}.{name}"));
                }
                ColumnKind::Reference(r) => {
                    builder = builder
                        .join(
                            &format!("{} {}", r.table, r.alias),
                            &format!("{}.id = {a}.{name}", r.alias),
                        )
                        .column(format!("{}.id::text AS {}", r.alias, r.id_column()))
                        .column(format!("{}.{} AS {}", r.alias, r.label, r.label_column()));
                    group_by.push(format!("{}.id", r.alias));
                    group_by.push(format!("{}.{}", r.alias, r.label));
                }
                ColumnKind::Tags => {
                    let t = TAG_JOIN_ALIAS;
                    builder = builder
                        .left_join(
                            &format!("{TAGS_TABLE} {t}"),
                            &format!("{t}.id = ANY({a}.{name})"),
                        )
                        .column(format!(
                            "COALESCE((array_agg(DISTINCT ROW({t}.id, {t}.name)) \
                             FILTER (WHERE {t}.id IS NOT NULL))::text, '{{}}') AS {TAGS_COLUMN}"
                        ));
                }
            }
        }

        if self.has_tags() {
            builder = builder.group_by(group_by);
        }
        builder
    }

    /// SELECT of a single row by id.
    pub fn get_one_statement(&self, id: &str) -> Statement {
        self.select()
            .filter(Predicate::uuid_eq(format!("{}.id", self.alias), id))
            .build()
    }

    /// Expression a listing filter or sort on `name` refers to.
    ///
    /// Table columns get the table alias. Output columns of a reference,
    /// such as `author_full_name` or `direction_id`, map to the joined
    /// table. Qualified names and anything else are used as given.
    pub fn resolve_column(&self, name: &str) -> String {
        if name.contains('.') {
            return name.to_string();
        }
        if self.has_column(name) {
            return format!("{}.{name}", self.alias);
        }
        for column in self.columns {
            if let ColumnKind::Reference(r) = column.kind {
                if name == r.id_column() {
                    return format!("{}.id", r.alias);
                }
                if name == r.label_column() {
                    return format!("{}.{}", r.alias, r.label);
                }
            }
        }
        name.to_string()
    }

    /// Filtered, sorted and paginated SELECT with a `total_count` column.
    ///
    /// Column names in `filter` and `sort` go through
    /// [`EntitySchema::resolve_column`]. The sort field is copied into the
    /// statement text; a `?` in it stays a literal character.
    pub fn list_statement(
        &self,
        filter: Option<Predicate>,
        sort: Option<&SortParams>,
        page: PageRequest,
    ) -> Statement {
        let mut builder = self
            .select()
            .column(format!("COUNT(*) OVER() AS {TOTAL_COUNT_COLUMN}"));

        if let Some(filter) = filter {
            builder = builder.filter(filter.map_columns(&|name: &str| self.resolve_column(name)));
        }
        if let Some(sort) = sort {
            let field = self.resolve_column(&sort.field).replace('?', "??");
            builder = builder.order_by(format!("{} {}", field, sort.direction));
        }
        if let Some(limit) = page.limit() {
            builder = builder.limit(limit);
        }
        if let Some(offset) = page.offset() {
            builder = builder.offset(offset);
        }

        builder.build()
    }

    /// INSERT guarded by existence checks on every reference.
    ///
    /// When a referenced row is missing the statement inserts nothing and
    /// returns no row.
    pub fn insert_statement(&self, record: &Record) -> Statement {
        let mut builder = InsertBuilder::into_table(self.table).returning("id::text");

        for column in self.columns {
            let Some(value) = record.get(column.name) else {
                continue;
            };
            let name = column.name;
            builder = match column.kind {
                ColumnKind::Counter => continue,
                ColumnKind::Text | ColumnKind::Float | ColumnKind::Date => {
                    builder.value(name, Expr::bind(value.clone()))
                }
                ColumnKind::Uuid => {
                    builder.value(name, Expr::new("NULLIF(?, '')::uuid", vec![value.clone()]))
                }
                ColumnKind::Reference(r) => builder
                    .value(name, Expr::new("NULLIF(?, '')::uuid", vec![value.clone()]))
                    .guard(Predicate::raw(
                        format!(
                            "EXISTS(SELECT 1 FROM {} WHERE id = NULLIF(?, '')::uuid)",
                            r.table
                        ),
                        vec![value.clone()],
                    )),
                ColumnKind::Tags => builder
                    .value(name, Expr::new("?::uuid[]", vec![value.clone()]))
                    .guard(Predicate::raw(tags_exist("?::uuid[]"), vec![value.clone()])),
            };
        }

        builder.build()
    }

    /// Partial UPDATE by id.
    ///
    /// Zero values keep the stored column. References and tag arrays are
    /// replaced only when every referenced row exists; otherwise the stored
    /// value is kept without an error.
    pub fn update_statement(&self, id: &str, record: &Record) -> Statement {
        let mut builder = UpdateBuilder::table(self.table);

        for column in self.columns {
            let Some(value) = record.get(column.name) else {
                continue;
            };
            let name = column.name;
            let expr = match column.kind {
                ColumnKind::Counter => continue,
                ColumnKind::Text => Expr::new(
                    format!("COALESCE(NULLIF(?, ''), {name})"),
                    vec![value.clone()],
                ),
                ColumnKind::Float => Expr::new(
                    format!("COALESCE(NULLIF(?, 0), {name})"),
                    vec![value.clone()],
                ),
                ColumnKind::Date => {
                    Expr::new(format!("COALESCE(?, {name})"), vec![value.clone()])
                }
                ColumnKind::Uuid => Expr::new(
                    format!("COALESCE(NULLIF(?, '')::uuid, {name})"),
                    vec![value.clone()],
                ),
                ColumnKind::Reference(r) => Expr::new(
                    format!(
                        "CASE WHEN EXISTS(SELECT 1 FROM {} WHERE id = NULLIF(?, '')::uuid) \
                         THEN NULLIF(?, '')::uuid ELSE {name} END",
                        r.table
                    ),
                    vec![value.clone(), value.clone()],
                ),
                ColumnKind::Tags => Expr::new(
                    format!(
                        "CASE WHEN cardinality(?::uuid[]) > 0 AND {} \
                         THEN ?::uuid[] ELSE {name} END",
                        tags_exist("?::uuid[]")
                    ),
                    vec![value.clone(), value.clone(), value.clone()],
                ),
            };
            builder = builder.set(name, expr);
        }

        builder.filter(Predicate::uuid_eq("id", id)).build()
    }

    pub fn delete_statement(&self, id: &str) -> Statement {
        DeleteBuilder::table(self.table)
            .filter(Predicate::uuid_eq("id", id))
            .build()
    }

    /// Unconditional overwrite of the rating.
    pub fn rate_statement(&self, id: &str, rating: f64) -> Statement {
        UpdateBuilder::table(self.table)
            .set("rating", Expr::bind(rating))
            .filter(Predicate::uuid_eq("id", id))
            .build()
    }

    pub fn download_count_up_statement(&self, id: &str) -> Statement {
        UpdateBuilder::table(self.table)
            .set("download_count", Expr::raw("download_count + 1"))
            .filter(Predicate::uuid_eq("id", id))
            .build()
    }
}

pub const ARTICLES: EntitySchema = EntitySchema {
    entity: "article",
    table: "articles",
    alias: "ar",
    columns: &[
        column("title", ColumnKind::Text),
        column("direction_uuid", ColumnKind::Reference(DIRECTION_REFERENCE)),
        column("author_uuid", ColumnKind::Reference(AUTHOR_REFERENCE)),
        column("difficulty", ColumnKind::Text),
        column("edition_date", ColumnKind::Date),
        column("rating", ColumnKind::Float),
        column("description", ColumnKind::Text),
        column("text", ColumnKind::Text),
        column("local_url", ColumnKind::Text),
        column("file_name", ColumnKind::Text),
        column("language", ColumnKind::Text),
        column("download_count", ColumnKind::Counter),
        column("tags_uuids", ColumnKind::Tags),
    ],
};

pub const BOOKS: EntitySchema = EntitySchema {
    entity: "book",
    table: "books",
    alias: "b",
    columns: &[
        column("title", ColumnKind::Text),
        column("direction_uuid", ColumnKind::Reference(DIRECTION_REFERENCE)),
        column("author_uuid", ColumnKind::Reference(AUTHOR_REFERENCE)),
        column("difficulty", ColumnKind::Text),
        column("edition_date", ColumnKind::Date),
        column("rating", ColumnKind::Float),
        column("description", ColumnKind::Text),
        column("local_url", ColumnKind::Text),
        column("file_name", ColumnKind::Text),
        column("image_url", ColumnKind::Text),
        column("language", ColumnKind::Text),
        column("download_count", ColumnKind::Counter),
        column("tags_uuids", ColumnKind::Tags),
    ],
};

pub const AUDIO: EntitySchema = EntitySchema {
    entity: "audio",
    table: "audio",
    alias: "aud",
    columns: &[
        column("title", ColumnKind::Text),
        column("direction_uuid", ColumnKind::Reference(DIRECTION_REFERENCE)),
        column("difficulty", ColumnKind::Text),
        column("creation_date", ColumnKind::Date),
        column("rating", ColumnKind::Float),
        column("local_url", ColumnKind::Text),
        column("file_name", ColumnKind::Text),
        column("language", ColumnKind::Text),
        column("download_count", ColumnKind::Counter),
        column("tags_uuids", ColumnKind::Tags),
    ],
};

pub const VIDEOS: EntitySchema = EntitySchema {
    entity: "video",
    table: "videos",
    alias: "v",
    columns: &[
        column("title", ColumnKind::Text),
        column("direction_uuid", ColumnKind::Reference(DIRECTION_REFERENCE)),
        column("description", ColumnKind::Text),
        column("creation_date", ColumnKind::Date),
        column("difficulty", ColumnKind::Text),
        column("rating", ColumnKind::Float),
        column("local_url", ColumnKind::Text),
        column("file_name", ColumnKind::Text),
        column("web_url", ColumnKind::Text),
        column("language", ColumnKind::Text),
        column("download_count", ColumnKind::Counter),
        column("tags_uuids", ColumnKind::Tags),
    ],
};

pub const AUTHORS: EntitySchema = EntitySchema {
    entity: "author",
    table: "authors",
    alias: "au",
    columns: &[column("full_name", ColumnKind::Text)],
};

pub const DIRECTIONS: EntitySchema = EntitySchema {
    entity: "direction",
    table: "directions",
    alias: "d",
    columns: &[column("name", ColumnKind::Text)],
};

pub const TAGS: EntitySchema = EntitySchema {
    entity: "tag",
    table: TAGS_TABLE,
    alias: "tg",
    columns: &[column("name", ColumnKind::Text)],
};

pub const REVIEWS: EntitySchema = EntitySchema {
    entity: "review",
    table: "reviews",
    alias: "r",
    columns: &[
        column("full_name", ColumnKind::Text),
        column("text", ColumnKind::Text),
        column("source", ColumnKind::Text),
        column("rating", ColumnKind::Float),
        column("date", ColumnKind::Date),
        column("literature_uuid", ColumnKind::Uuid),
    ],
};

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_common::pagination::SortParams;

    #[test]
    fn test_tag_statements() {
        assert_eq!(
            TAGS.get_one_statement("t1").sql,
            "SELECT tg.id::text AS id, tg.name FROM tags tg WHERE tg.id = $1::uuid"
        );

        let insert = TAGS.insert_statement(&Record::new().with("name", "fiction"));
        assert_eq!(
            insert.sql,
            "INSERT INTO tags (name) VALUES ($1) RETURNING id::text"
        );
        assert_eq!(insert.args, vec![SqlValue::from("fiction")]);

        let update = TAGS.update_statement("t1", &Record::new().with("name", ""));
        assert_eq!(
            update.sql,
            "UPDATE tags SET name = COALESCE(NULLIF($1, ''), name) WHERE id = $2::uuid"
        );
        assert_eq!(update.args, vec![SqlValue::from(""), SqlValue::from("t1")]);

        assert_eq!(
            TAGS.delete_statement("t1").sql,
            "DELETE FROM tags WHERE id = $1::uuid"
        );
    }

    #[test]
    fn test_list_without_tags_has_no_group_by() {
        let statement = AUTHORS.list_statement(
            Some(Predicate::ilike("full_name", "%herbert%")),
            Some(&SortParams::asc("full_name")),
            PageRequest::new(2, 10),
        );
        assert_eq!(
            statement.sql,
            "SELECT au.id::text AS id, au.full_name, COUNT(*) OVER() AS total_count \
             FROM authors au WHERE au.full_name ILIKE $1 \
             ORDER BY au.full_name ASC LIMIT 10 OFFSET 10"
        );
    }

    #[test]
    fn test_book_select_joins_references_and_tags() {
        let sql = BOOKS.get_one_statement("b1").sql;

        assert!(sql.starts_with("SELECT b.id::text AS id, b.title, "));
        assert!(sql.contains("JOIN directions d ON d.id = b.direction_uuid"));
        assert!(sql.contains("JOIN authors au ON au.id = b.author_uuid"));
        assert!(sql.contains("LEFT JOIN tags t ON t.id = ANY(b.tags_uuids)"));
        assert!(sql.contains("d.id::text AS direction_id, d.name AS direction_name"));
        assert!(sql.contains("au.id::text AS author_id, au.full_name AS author_full_name"));
        assert!(sql.contains(
            "COALESCE((array_agg(DISTINCT ROW(t.id, t.name)) \
             FILTER (WHERE t.id IS NOT NULL))::text, '{}') AS tags"
        ));
        assert!(sql.contains("WHERE b.id = $1::uuid GROUP BY b.id, b.title, d.id, d.name, au.id"));
        assert!(!sql.contains("total_count"));
    }

    #[test]
    fn test_list_unbounded_and_sorted_by_output_column() {
        let statement = BOOKS.list_statement(
            None,
            Some(&SortParams::desc("author_full_name")),
            PageRequest::unbounded(),
        );

        assert!(statement.sql.contains("COUNT(*) OVER() AS total_count"));
        assert!(statement.sql.ends_with("ORDER BY au.full_name DESC"));
        assert!(!statement.sql.contains("LIMIT"));
        assert!(statement.args.is_empty());
    }

    #[test]
    fn test_resolve_column() {
        assert_eq!(BOOKS.resolve_column("title"), "b.title");
        assert_eq!(BOOKS.resolve_column("id"), "b.id");
        assert_eq!(BOOKS.resolve_column("author_full_name"), "au.full_name");
        assert_eq!(BOOKS.resolve_column("author_id"), "au.id");
        assert_eq!(BOOKS.resolve_column("direction_name"), "d.name");
        assert_eq!(BOOKS.resolve_column("t.name"), "t.name");
        assert_eq!(AUDIO.resolve_column("author_full_name"), "author_full_name");
    }

    #[test]
    fn test_list_filters_on_reference_output_columns() {
        let statement = BOOKS.list_statement(
            Some(
                Predicate::eq("author_full_name", "Frank Herbert")
                    .and(Predicate::uuid_eq("direction_id", "d1"))
                    .and(Predicate::eq("language", "en")),
            ),
            None,
            PageRequest::unbounded(),
        );

        assert!(statement.sql.contains(
            "WHERE (au.full_name = $1 AND d.id = $2::uuid AND b.language = $3)"
        ));
        assert_eq!(statement.args.len(), 3);
    }

    #[test]
    fn test_list_sort_field_question_mark_is_literal() {
        let statement = AUTHORS.list_statement(
            Some(Predicate::eq("full_name", "x")),
            Some(&SortParams::asc("full_name?")),
            PageRequest::new(1, 5),
        );

        assert!(statement.sql.contains("WHERE au.full_name = $1"));
        assert!(statement.sql.contains("ORDER BY full_name? ASC LIMIT 5"));
        assert_eq!(statement.args, vec![SqlValue::from("x")]);
    }

    #[test]
    fn test_book_insert_guards_every_reference() {
        let record = Record::new()
            .with("title", "Dune")
            .with("direction_uuid", "d1")
            .with("author_uuid", "a1")
            .with("rating", 4.5)
            .with("download_count", 7_i64)
            .with("tags_uuids", vec!["t1".to_string()]);

        let statement = BOOKS.insert_statement(&record);

        assert_eq!(
            statement.sql,
            "INSERT INTO books (title, direction_uuid, author_uuid, rating, tags_uuids) \
             SELECT $1, NULLIF($2, '')::uuid, NULLIF($3, '')::uuid, $4, $5::uuid[] \
             WHERE (EXISTS(SELECT 1 FROM directions WHERE id = NULLIF($6, '')::uuid) \
             AND EXISTS(SELECT 1 FROM authors WHERE id = NULLIF($7, '')::uuid) \
             AND NOT EXISTS(SELECT 1 FROM unnest($8::uuid[]) AS x(id) \
             WHERE NOT EXISTS(SELECT 1 FROM tags WHERE id = x.id))) \
             RETURNING id::text"
        );
        assert_eq!(statement.args.len(), 8);
    }

    #[test]
    fn test_update_keeps_zero_values_and_checks_references() {
        let record = Record::new()
            .with("title", "")
            .with("author_uuid", "a2")
            .with("rating", 0.0)
            .with("edition_date", None::<chrono::NaiveDate>)
            .with("tags_uuids", Vec::<String>::new());

        let statement = ARTICLES.update_statement("ar1", &record);

        assert_eq!(
            statement.sql,
            "UPDATE articles SET title = COALESCE(NULLIF($1, ''), title), \
             author_uuid = CASE WHEN EXISTS(SELECT 1 FROM authors WHERE id = NULLIF($2, '')::uuid) \
             THEN NULLIF($3, '')::uuid ELSE author_uuid END, \
             edition_date = COALESCE($4, edition_date), \
             rating = COALESCE(NULLIF($5, 0), rating), \
             tags_uuids = CASE WHEN cardinality($6::uuid[]) > 0 \
             AND NOT EXISTS(SELECT 1 FROM unnest($7::uuid[]) AS x(id) \
             WHERE NOT EXISTS(SELECT 1 FROM tags WHERE id = x.id)) \
             THEN $8::uuid[] ELSE tags_uuids END \
             WHERE id = $9::uuid"
        );
        assert_eq!(statement.args.last(), Some(&SqlValue::from("ar1")));
    }

    #[test]
    fn test_review_literature_reference_is_unchecked() {
        let insert = REVIEWS.insert_statement(
            &Record::new()
                .with("full_name", "Reader")
                .with("literature_uuid", "b1"),
        );
        assert_eq!(
            insert.sql,
            "INSERT INTO reviews (full_name, literature_uuid) \
             VALUES ($1, NULLIF($2, '')::uuid) RETURNING id::text"
        );

        let select = REVIEWS.get_one_statement("r1").sql;
        assert!(select.contains("r.literature_uuid::text AS literature_uuid"));
        assert!(!select.contains("GROUP BY"));
    }

    #[test]
    fn test_rate_and_download_count_up() {
        assert_eq!(
            VIDEOS.rate_statement("v1", 4.0).sql,
            "UPDATE videos SET rating = $1 WHERE id = $2::uuid"
        );
        assert_eq!(
            AUDIO.download_count_up_statement("a1").sql,
            "UPDATE audio SET download_count = download_count + 1 WHERE id = $1::uuid"
        );
    }

    #[test]
    fn test_record_changed_columns() {
        let record = Record::new()
            .with("title", "")
            .with("title", "Dune")
            .with("rating", 0.0)
            .with("language", "en");
        assert_eq!(record.changed_columns(), vec!["title", "language"]);
        assert_eq!(record.get("title"), Some(&SqlValue::from("Dune")));
    }

    #[test]
    fn test_schema_columns() {
        assert!(BOOKS.has_column("id"));
        assert!(BOOKS.has_column("image_url"));
        assert!(!ARTICLES.has_column("image_url"));
        assert_eq!(
            VIDEOS.column("web_url").map(|c| c.kind),
            Some(ColumnKind::Text)
        );
    }
}
