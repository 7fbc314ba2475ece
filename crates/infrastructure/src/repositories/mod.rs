//! Repository implementations for the catalog entities.
//!
//! Each entity has a repository trait and a PostgreSQL implementation. The
//! implementations share `EntityTable`, which runs the statements generated
//! from the entity's [`EntitySchema`] and applies the common contracts:
//!
//! - reads of a missing id fail with [`Error::NotFound`];
//! - listings skip rows that fail to decode, keeping the database total;
//! - creates run in a transaction and fail with [`Error::CreateRejected`]
//!   when a reference guard rejects the row;
//! - every other mutation runs in a transaction that is rolled back with
//!   [`Error::NoRowsAffected`] when no row matched the id.

mod article_repository;
mod audio_repository;
mod author_repository;
mod book_repository;
mod direction_repository;
mod review_repository;
mod tag_repository;
mod video_repository;

pub use article_repository::*;
pub use audio_repository::*;
pub use author_repository::*;
pub use book_repository::*;
pub use direction_repository::*;
pub use review_repository::*;
pub use tag_repository::*;
pub use video_repository::*;

use catalog_common::pagination::{PageRequest, PaginatedResult, SortParams};
use catalog_domain::{Author, Direction, Tag};
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, error, warn};

use crate::database::{DatabasePool, TransactionExt};
use crate::query::{bind_values, Predicate, SqlValue, Statement};
use crate::schema::{
    EntitySchema, Record, AUTHOR_REFERENCE, DIRECTION_REFERENCE, TAGS_COLUMN, TOTAL_COUNT_COLUMN,
};
use crate::tags::decode_tags;
use crate::{Error, Result};

/// Sorting, filtering and pagination of a listing.
///
/// The sort field is copied into the statement text. Callers passing user
/// input should run [`ListOptions::restrict_sort`] first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListOptions {
    pub sort: Option<SortParams>,
    pub filter: Option<Predicate>,
    pub page: PageRequest,
}

impl ListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sort(mut self, sort: SortParams) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Add a filter, AND-ed with any previous one.
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    pub fn page(mut self, page: PageRequest) -> Self {
        self.page = page;
        self
    }

    /// Reject a sort field outside of `allowed`.
    pub fn restrict_sort(self, allowed: &[&str]) -> Result<Self> {
        if let Some(sort) = &self.sort {
            sort.validate_against(allowed)
                .map_err(Error::InvalidArgument)?;
        }
        Ok(self)
    }
}

/// Rows whose tag array contains every id in `tag_ids`.
pub fn tag_filter(tag_ids: &[String]) -> Predicate {
    Predicate::raw(
        "tags_uuids @> ?::uuid[]",
        vec![SqlValue::TextArray(tag_ids.to_vec())],
    )
}

/// Statement runner for one entity table.
#[derive(Debug, Clone)]
pub(crate) struct EntityTable {
    pool: DatabasePool,
    schema: EntitySchema,
}

impl EntityTable {
    pub(crate) fn new(pool: DatabasePool, schema: EntitySchema) -> Self {
        Self { pool, schema }
    }

    fn query_failed(&self, id: &str, e: sqlx::Error) -> Error {
        error!(entity = self.schema.entity, id, error = %e, "Query failed");
        Error::Database(e)
    }

    /// Fetch and decode the row with `id`.
    pub(crate) async fn fetch_one<T, F>(&self, id: &str, decode: F) -> Result<T>
    where
        F: Fn(&PgRow) -> Result<T> + Send + Sync,
    {
        let Statement { sql, args } = self.schema.get_one_statement(id);

        let row = bind_values(sqlx::query(&sql), args)
            .fetch_optional(self.pool.pool())
            .await
            .map_err(|e| self.query_failed(id, e))?;

        match row {
            Some(row) => decode(&row).map_err(|e| {
                error!(entity = self.schema.entity, id, error = %e, "Failed to decode row");
                e
            }),
            None => {
                debug!(entity = self.schema.entity, id, "Row not found");
                Err(Error::NotFound {
                    entity: self.schema.entity,
                    id: id.to_string(),
                })
            }
        }
    }

    /// Fetch one page of rows together with the unpaginated total.
    pub(crate) async fn fetch_page<T, F>(
        &self,
        options: ListOptions,
        decode: F,
    ) -> Result<PaginatedResult<T>>
    where
        T: Send,
        F: Fn(&PgRow) -> Result<T> + Send + Sync,
    {
        let ListOptions { sort, filter, page } = options;
        let Statement { sql, args } = self.schema.list_statement(filter, sort.as_ref(), page);

        let rows = bind_values(sqlx::query(&sql), args)
            .fetch_all(self.pool.pool())
            .await
            .map_err(|e| self.query_failed("", e))?;

        let total = match rows.first() {
            Some(row) => row.try_get::<i64, _>(TOTAL_COUNT_COLUMN)?,
            None => 0,
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            match decode(row) {
                Ok(item) => items.push(item),
                Err(e) => {
                    warn!(entity = self.schema.entity, error = %e, "Skipping row that failed to decode")
                }
            }
        }

        debug!(
            entity = self.schema.entity,
            returned = items.len(),
            total,
            "Listing fetched"
        );
        Ok(PaginatedResult::new(items, page, total.max(0) as u64))
    }

    /// Insert a row inside a transaction, returning its generated id.
    pub(crate) async fn insert(&self, record: &Record) -> Result<String> {
        let Statement { sql, args } = self.schema.insert_statement(record);
        let entity = self.schema.entity;

        let mut tx = self.pool.begin().await?;
        let result = match bind_values(sqlx::query(&sql), args)
            .fetch_optional(&mut *tx)
            .await
        {
            Ok(Some(row)) => row.try_get::<String, _>("id").map_err(Error::Database),
            Ok(None) => {
                warn!(entity, "Insert rejected by reference checks");
                Err(Error::CreateRejected { entity })
            }
            Err(e) => Err(self.query_failed("", e)),
        };

        let id = tx.commit_or_rollback(result).await?;
        debug!(entity, id = %id, "Row created");
        Ok(id)
    }

    /// Run a mutation of the row with `id` inside a transaction.
    ///
    /// Zero affected rows roll the transaction back and fail with
    /// [`Error::NoRowsAffected`].
    pub(crate) async fn execute_for(&self, id: &str, statement: Statement) -> Result<()> {
        let Statement { sql, args } = statement;
        let entity = self.schema.entity;

        let mut tx = self.pool.begin().await?;
        let result = match bind_values(sqlx::query(&sql), args)
            .execute(&mut *tx)
            .await
        {
            Ok(done) if done.rows_affected() == 0 => {
                debug!(entity, id, "No rows affected");
                Err(Error::NoRowsAffected {
                    entity,
                    id: id.to_string(),
                })
            }
            Ok(_) => Ok(()),
            Err(e) => Err(self.query_failed(id, e)),
        };

        tx.commit_or_rollback(result).await
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<()> {
        self.execute_for(id, self.schema.delete_statement(id)).await
    }

    pub(crate) async fn update(&self, id: &str, record: &Record) -> Result<()> {
        debug!(
            entity = self.schema.entity,
            id,
            changed = ?record.changed_columns(),
            "Applying partial update"
        );
        self.execute_for(id, self.schema.update_statement(id, record))
            .await
    }

    pub(crate) async fn rate(&self, id: &str, rating: f64) -> Result<()> {
        self.execute_for(id, self.schema.rate_statement(id, rating))
            .await
    }

    pub(crate) async fn download_count_up(&self, id: &str) -> Result<()> {
        self.execute_for(id, self.schema.download_count_up_statement(id))
            .await
    }
}

pub(crate) fn author_from_row(row: &PgRow) -> Result<Author> {
    Ok(Author {
        id: row.try_get(AUTHOR_REFERENCE.id_column().as_str())?,
        full_name: row.try_get(AUTHOR_REFERENCE.label_column().as_str())?,
    })
}

pub(crate) fn direction_from_row(row: &PgRow) -> Result<Direction> {
    Ok(Direction {
        id: row.try_get(DIRECTION_REFERENCE.id_column().as_str())?,
        name: row.try_get(DIRECTION_REFERENCE.label_column().as_str())?,
    })
}

pub(crate) fn tags_from_row(row: &PgRow) -> Result<Vec<Tag>> {
    let raw: String = row.try_get(TAGS_COLUMN)?;
    Ok(decode_tags(&raw)?)
}

/// Text of an optional column, empty when NULL.
pub(crate) fn text_or_empty(row: &PgRow, column: &str) -> Result<String> {
    Ok(row
        .try_get::<Option<String>, _>(column)?
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::DatabaseConfig;
    use crate::schema::{Column, ColumnKind};
    use sqlx::Executor;

    const LISTING_ROWS: EntitySchema = EntitySchema {
        entity: "listing row",
        table: "listing_decode_rows",
        alias: "lr",
        columns: &[Column {
            name: "name",
            kind: ColumnKind::Text,
        }],
    };

    #[test]
    fn test_list_options_builder() {
        let options = ListOptions::new()
            .sort(SortParams::desc("rating"))
            .filter(Predicate::eq("language", "en"))
            .filter(Predicate::gte("rating", 3.0))
            .page(PageRequest::new(2, 25));

        assert_eq!(options.page.offset(), Some(25));
        assert!(matches!(&options.filter, Some(Predicate::And(items)) if items.len() == 2));
    }

    #[test]
    fn test_restrict_sort() {
        let allowed = ["title", "rating"];

        assert!(ListOptions::new().restrict_sort(&allowed).is_ok());
        assert!(ListOptions::new()
            .sort(SortParams::asc("title"))
            .restrict_sort(&allowed)
            .is_ok());

        let err = ListOptions::new()
            .sort(SortParams::asc("rating; DROP TABLE books"))
            .restrict_sort(&allowed)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_tag_filter() {
        let expr = tag_filter(&["t1".to_string(), "t2".to_string()]).to_expr();
        assert_eq!(expr.sql(), "tags_uuids @> ?::uuid[]");
        assert_eq!(
            expr.args(),
            &[SqlValue::TextArray(vec!["t1".to_string(), "t2".to_string()])]
        );
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL to be running
    async fn test_fetch_page_skips_rows_that_fail_to_decode() {
        let url = std::env::var("TEST_DATABASE_URL")
            .or_else(|_| std::env::var("DATABASE_URL"))
            .unwrap();
        let pool = DatabasePool::new(&DatabaseConfig::test_config(url))
            .await
            .unwrap();
        pool.pool()
            .execute(
                "CREATE TABLE IF NOT EXISTS listing_decode_rows (\
                 id UUID PRIMARY KEY DEFAULT gen_random_uuid(), \
                 name TEXT NOT NULL DEFAULT '')",
            )
            .await
            .unwrap();

        let table = EntityTable::new(pool, LISTING_ROWS);
        let marker = uuid::Uuid::new_v4().to_string();
        for suffix in ["a", "b-broken", "c"] {
            table
                .insert(&Record::new().with("name", format!("{marker}-{suffix}")))
                .await
                .unwrap();
        }

        let options = ListOptions::new()
            .filter(Predicate::like("name", format!("{marker}%")))
            .sort(SortParams::asc("name"));
        let page = table
            .fetch_page(options, |row: &PgRow| {
                let name: String = row.try_get("name")?;
                if name.ends_with("-broken") {
                    return Err(Error::InvalidArgument(name));
                }
                Ok(name)
            })
            .await
            .unwrap();

        assert_eq!(page.total, 3);
        assert_eq!(page.items.len() as u64, page.total - 1);
        assert_eq!(page.items, vec![format!("{marker}-a"), format!("{marker}-c")]);
    }
}
