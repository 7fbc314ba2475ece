//! Author repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, instrument};

use catalog_common::pagination::PaginatedResult;
use catalog_domain::{Author, CreateAuthor, UpdateAuthor};

use super::{EntityTable, ListOptions};
use crate::database::DatabasePool;
use crate::schema::{Record, AUTHORS};
use crate::Result;

/// Repository trait for author operations.
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Get an author by id.
    async fn get_one(&self, id: &str) -> Result<Author>;

    /// List authors with filtering, sorting and pagination.
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Author>>;

    /// Create an author and return its id.
    async fn create(&self, author: &CreateAuthor) -> Result<String>;

    /// Delete an author.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Apply a partial update. An empty name keeps the stored value.
    async fn update(&self, id: &str, changes: &UpdateAuthor) -> Result<()>;
}

/// PostgreSQL implementation of AuthorRepository.
#[derive(Debug, Clone)]
pub struct PgAuthorRepository {
    table: EntityTable,
}

impl PgAuthorRepository {
    /// Create a new PostgreSQL author repository.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            table: EntityTable::new(pool, AUTHORS),
        }
    }
}

fn author_from_row(row: &PgRow) -> Result<Author> {
    Ok(Author {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
    })
}

#[async_trait]
impl AuthorRepository for PgAuthorRepository {
    #[instrument(skip(self))]
    async fn get_one(&self, id: &str) -> Result<Author> {
        self.table.fetch_one(id, author_from_row).await
    }

    #[instrument(skip(self, options))]
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Author>> {
        self.table.fetch_page(options, author_from_row).await
    }

    #[instrument(skip(self, author), fields(full_name = %author.full_name))]
    async fn create(&self, author: &CreateAuthor) -> Result<String> {
        let record = Record::new().with("full_name", &author.full_name);
        let id = self.table.insert(&record).await?;
        debug!(author_id = %id, "Author created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &UpdateAuthor) -> Result<()> {
        let record = Record::new().with("full_name", &changes.full_name);
        self.table.update(id, &record).await
    }
}
