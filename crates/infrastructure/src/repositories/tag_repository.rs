//! Tag repository implementation.
//!
//! Tags are referenced from the `tags_uuids` arrays of literature rows, not
//! through a foreign key. Deleting a tag leaves its id in those arrays; reads
//! of the items simply stop returning it because the join finds no row.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, instrument};

use catalog_common::pagination::PaginatedResult;
use catalog_domain::{Tag, CreateTag, UpdateTag};

use super::{EntityTable, ListOptions};
use crate::database::DatabasePool;
use crate::schema::{Record, TAGS};
use crate::Result;

/// Repository trait for tag operations.
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Get a tag by id.
    async fn get_one(&self, id: &str) -> Result<Tag>;

    /// List tags with filtering, sorting and pagination.
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Tag>>;

    /// Create a tag and return its id.
    async fn create(&self, tag: &CreateTag) -> Result<String>;

    /// Delete a tag. Items still listing its id are not touched.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Apply a partial update. An empty name keeps the stored value.
    async fn update(&self, id: &str, changes: &UpdateTag) -> Result<()>;
}

/// PostgreSQL implementation of TagRepository.
#[derive(Debug, Clone)]
pub struct PgTagRepository {
    table: EntityTable,
}

impl PgTagRepository {
    /// Create a new PostgreSQL tag repository.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            table: EntityTable::new(pool, TAGS),
        }
    }
}

fn tag_from_row(row: &PgRow) -> Result<Tag> {
    Ok(Tag {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

#[async_trait]
impl TagRepository for PgTagRepository {
    #[instrument(skip(self))]
    async fn get_one(&self, id: &str) -> Result<Tag> {
        self.table.fetch_one(id, tag_from_row).await
    }

    #[instrument(skip(self, options))]
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Tag>> {
        self.table.fetch_page(options, tag_from_row).await
    }

    #[instrument(skip(self, tag), fields(name = %tag.name))]
    async fn create(&self, tag: &CreateTag) -> Result<String> {
        let record = Record::new().with("name", &tag.name);
        let id = self.table.insert(&record).await?;
        debug!(tag_id = %id, "Tag created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &UpdateTag) -> Result<()> {
        let record = Record::new().with("name", &changes.name);
        self.table.update(id, &record).await
    }
}
