//! Direction repository implementation.
//!
//! Directions form a single-level taxonomy; every literature item points
//! at exactly one.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, instrument};

use catalog_common::pagination::PaginatedResult;
use catalog_domain::{Direction, CreateDirection, UpdateDirection};

use super::{EntityTable, ListOptions};
use crate::database::DatabasePool;
use crate::schema::{Record, DIRECTIONS};
use crate::Result;

/// Repository trait for direction operations.
#[async_trait]
pub trait DirectionRepository: Send + Sync {
    /// Get a direction by id.
    async fn get_one(&self, id: &str) -> Result<Direction>;

    /// List directions with filtering, sorting and pagination.
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Direction>>;

    /// Create a direction and return its id.
    async fn create(&self, direction: &CreateDirection) -> Result<String>;

    /// Delete a direction.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Apply a partial update. An empty name keeps the stored value.
    async fn update(&self, id: &str, changes: &UpdateDirection) -> Result<()>;
}

/// PostgreSQL implementation of DirectionRepository.
#[derive(Debug, Clone)]
pub struct PgDirectionRepository {
    table: EntityTable,
}

impl PgDirectionRepository {
    /// Create a new PostgreSQL direction repository.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            table: EntityTable::new(pool, DIRECTIONS),
        }
    }
}

fn direction_from_row(row: &PgRow) -> Result<Direction> {
    Ok(Direction {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
    })
}

#[async_trait]
impl DirectionRepository for PgDirectionRepository {
    #[instrument(skip(self))]
    async fn get_one(&self, id: &str) -> Result<Direction> {
        self.table.fetch_one(id, direction_from_row).await
    }

    #[instrument(skip(self, options))]
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Direction>> {
        self.table.fetch_page(options, direction_from_row).await
    }

    #[instrument(skip(self, direction), fields(name = %direction.name))]
    async fn create(&self, direction: &CreateDirection) -> Result<String> {
        let record = Record::new().with("name", &direction.name);
        let id = self.table.insert(&record).await?;
        debug!(direction_id = %id, "Direction created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &UpdateDirection) -> Result<()> {
        let record = Record::new().with("name", &changes.name);
        self.table.update(id, &record).await
    }
}
