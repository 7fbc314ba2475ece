//! Review repository implementation.
//!
//! A review points at one literature item through `literature_uuid`. The
//! item may be an article, book, audio or video recording, so the reference
//! is stored unchecked.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, instrument};

use catalog_common::pagination::PaginatedResult;
use catalog_domain::{CreateReview, Review, UpdateReview};

use super::{text_or_empty, EntityTable, ListOptions};
use crate::database::DatabasePool;
use crate::query::Predicate;
use crate::schema::{Record, REVIEWS};
use crate::Result;

/// Repository trait for review operations.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Get a review by id.
    async fn get_one(&self, id: &str) -> Result<Review>;

    /// List reviews with filtering, sorting and pagination.
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Review>>;

    /// Create a review and return its id.
    async fn create(&self, review: &CreateReview) -> Result<String>;

    /// Delete a review.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Apply a partial update.
    async fn update(&self, id: &str, changes: &UpdateReview) -> Result<()>;

    /// Overwrite the rating.
    async fn rate(&self, id: &str, rating: f64) -> Result<()>;
}

/// Reviews of one literature item.
pub fn reviews_of(literature_id: impl Into<String>) -> Predicate {
    Predicate::uuid_eq("literature_uuid", literature_id)
}

/// PostgreSQL implementation of ReviewRepository.
#[derive(Debug, Clone)]
pub struct PgReviewRepository {
    table: EntityTable,
}

impl PgReviewRepository {
    /// Create a new PostgreSQL review repository.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            table: EntityTable::new(pool, REVIEWS),
        }
    }
}

fn review_from_row(row: &PgRow) -> Result<Review> {
    Ok(Review {
        id: row.try_get("id")?,
        full_name: text_or_empty(row, "full_name")?,
        text: text_or_empty(row, "text")?,
        source: text_or_empty(row, "source")?,
        rating: row.try_get("rating")?,
        date: row.try_get("date")?,
        literature_id: text_or_empty(row, "literature_uuid")?,
    })
}

#[async_trait]
impl ReviewRepository for PgReviewRepository {
    #[instrument(skip(self))]
    async fn get_one(&self, id: &str) -> Result<Review> {
        self.table.fetch_one(id, review_from_row).await
    }

    #[instrument(skip(self, options))]
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Review>> {
        self.table.fetch_page(options, review_from_row).await
    }

    #[instrument(skip(self, review), fields(literature_id = %review.literature_id))]
    async fn create(&self, review: &CreateReview) -> Result<String> {
        let record = Record::new()
            .with("full_name", &review.full_name)
            .with("text", &review.text)
            .with("source", &review.source)
            .with("rating", review.rating)
            .with("date", review.date)
            .with("literature_uuid", &review.literature_id);

        let id = self.table.insert(&record).await?;
        debug!(review_id = %id, "Review created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &UpdateReview) -> Result<()> {
        let record = Record::new()
            .with("full_name", &changes.full_name)
            .with("text", &changes.text)
            .with("source", &changes.source)
            .with("rating", changes.rating)
            .with("date", changes.date)
            .with("literature_uuid", &changes.literature_id);

        self.table.update(id, &record).await
    }

    #[instrument(skip(self))]
    async fn rate(&self, id: &str, rating: f64) -> Result<()> {
        self.table.rate(id, rating).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviews_of() {
        let expr = reviews_of("b1").qualify("r").to_expr();
        assert_eq!(expr.sql(), "r.literature_uuid = ?::uuid");
    }
}
