//! Article repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, instrument};

use catalog_common::pagination::PaginatedResult;
use catalog_domain::{Article, CreateArticle, LocalFile, UpdateArticle};

use super::{author_from_row, direction_from_row, tags_from_row, text_or_empty, EntityTable, ListOptions};
use crate::database::DatabasePool;
use crate::schema::{Record, ARTICLES};
use crate::Result;

/// Repository trait for article operations.
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// Get an article with its author, direction and tags.
    async fn get_one(&self, id: &str) -> Result<Article>;

    /// List articles with filtering, sorting and pagination.
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Article>>;

    /// Create an article and return its id.
    async fn create(&self, article: &CreateArticle) -> Result<String>;

    /// Delete an article.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Apply a partial update.
    async fn update(&self, id: &str, changes: &UpdateArticle) -> Result<()>;

    /// Overwrite the rating.
    async fn rate(&self, id: &str, rating: f64) -> Result<()>;

    /// Increment the download counter by one.
    async fn download_count_up(&self, id: &str) -> Result<()>;
}

/// PostgreSQL implementation of ArticleRepository.
#[derive(Debug, Clone)]
pub struct PgArticleRepository {
    table: EntityTable,
}

impl PgArticleRepository {
    /// Create a new PostgreSQL article repository.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            table: EntityTable::new(pool, ARTICLES),
        }
    }
}

fn create_record(article: &CreateArticle) -> Record {
    let file = LocalFile::split(&article.local_url);
    Record::new()
        .with("title", &article.title)
        .with("direction_uuid", &article.direction_id)
        .with("author_uuid", &article.author_id)
        .with("difficulty", &article.difficulty)
        .with("edition_date", article.edition_date)
        .with("rating", article.rating)
        .with("description", &article.description)
        .with("local_url", file.path)
        .with("file_name", file.file_name)
        .with("text", &article.text)
        .with("language", &article.language)
        .with("tags_uuids", article.tag_ids.as_slice())
}

fn update_record(changes: &UpdateArticle) -> Record {
    let file = LocalFile::split(&changes.local_url);
    Record::new()
        .with("title", &changes.title)
        .with("direction_uuid", &changes.direction_id)
        .with("author_uuid", &changes.author_id)
        .with("difficulty", &changes.difficulty)
        .with("edition_date", changes.edition_date)
        .with("rating", changes.rating)
        .with("description", &changes.description)
        .with("local_url", file.path)
        .with("file_name", file.file_name)
        .with("text", &changes.text)
        .with("language", &changes.language)
        .with("tags_uuids", changes.tag_ids.as_slice())
}

fn article_from_row(row: &PgRow) -> Result<Article> {
    Ok(Article {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        direction: direction_from_row(row)?,
        author: author_from_row(row)?,
        difficulty: text_or_empty(row, "difficulty")?,
        edition_date: row.try_get("edition_date")?,
        rating: row.try_get("rating")?,
        description: text_or_empty(row, "description")?,
        text: text_or_empty(row, "text")?,
        local_url: text_or_empty(row, "local_url")?,
        file_name: text_or_empty(row, "file_name")?,
        language: text_or_empty(row, "language")?,
        download_count: row.try_get("download_count")?,
        tags: tags_from_row(row)?,
    })
}

#[async_trait]
impl ArticleRepository for PgArticleRepository {
    #[instrument(skip(self))]
    async fn get_one(&self, id: &str) -> Result<Article> {
        self.table.fetch_one(id, article_from_row).await
    }

    #[instrument(skip(self, options))]
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Article>> {
        self.table.fetch_page(options, article_from_row).await
    }

    #[instrument(skip(self, article), fields(title = %article.title))]
    async fn create(&self, article: &CreateArticle) -> Result<String> {
        let id = self.table.insert(&create_record(article)).await?;
        debug!(article_id = %id, "Article created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &UpdateArticle) -> Result<()> {
        self.table.update(id, &update_record(changes)).await
    }

    #[instrument(skip(self))]
    async fn rate(&self, id: &str, rating: f64) -> Result<()> {
        self.table.rate(id, rating).await
    }

    #[instrument(skip(self))]
    async fn download_count_up(&self, id: &str) -> Result<()> {
        self.table.download_count_up(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::SqlValue;

    #[test]
    fn test_create_record_splits_local_url() {
        let article = CreateArticle {
            title: "Ownership in practice".to_string(),
            local_url: "articles/2024/ownership.pdf".to_string(),
            tag_ids: vec!["t1".to_string()],
            ..Default::default()
        };

        let record = create_record(&article);
        assert_eq!(
            record.get("local_url"),
            Some(&SqlValue::from("articles/2024/ownership.pdf"))
        );
        assert_eq!(record.get("file_name"), Some(&SqlValue::from("ownership.pdf")));
        assert_eq!(
            record.get("tags_uuids"),
            Some(&SqlValue::TextArray(vec!["t1".to_string()]))
        );
        assert!(record.get("download_count").is_none());
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        assert!(update_record(&UpdateArticle::default())
            .changed_columns()
            .is_empty());
    }

    #[test]
    fn test_update_record_only_reports_set_fields() {
        let changes = UpdateArticle {
            text: "Revised body".to_string(),
            rating: 4.5,
            ..Default::default()
        };
        assert_eq!(
            update_record(&changes).changed_columns(),
            vec!["rating", "text"]
        );
    }
}
