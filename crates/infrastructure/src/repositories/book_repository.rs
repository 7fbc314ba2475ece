//! Book repository implementation.
//!
//! PostgreSQL-backed persistence for books, including their author,
//! direction and tag references.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, instrument};

use catalog_common::pagination::PaginatedResult;
use catalog_domain::{Book, CreateBook, LocalFile, UpdateBook};

use super::{author_from_row, direction_from_row, tags_from_row, text_or_empty, EntityTable, ListOptions};
use crate::database::DatabasePool;
use crate::schema::{Record, BOOKS};
use crate::Result;

/// Repository trait for book operations.
#[async_trait]
pub trait BookRepository: Send + Sync {
    /// Get a book with its author, direction and tags.
    async fn get_one(&self, id: &str) -> Result<Book>;

    /// List books with filtering, sorting and pagination.
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Book>>;

    /// Create a book and return its id.
    async fn create(&self, book: &CreateBook) -> Result<String>;

    /// Delete a book.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Apply a partial update.
    async fn update(&self, id: &str, changes: &UpdateBook) -> Result<()>;

    /// Overwrite the rating.
    async fn rate(&self, id: &str, rating: f64) -> Result<()>;

    /// Increment the download counter by one.
    async fn download_count_up(&self, id: &str) -> Result<()>;
}

/// PostgreSQL implementation of BookRepository.
#[derive(Debug, Clone)]
pub struct PgBookRepository {
    table: EntityTable,
}

impl PgBookRepository {
    /// Create a new PostgreSQL book repository.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            table: EntityTable::new(pool, BOOKS),
        }
    }
}

fn create_record(book: &CreateBook) -> Record {
    let file = LocalFile::split(&book.local_url);
    Record::new()
        .with("title", &book.title)
        .with("direction_uuid", &book.direction_id)
        .with("author_uuid", &book.author_id)
        .with("difficulty", &book.difficulty)
        .with("edition_date", book.edition_date)
        .with("rating", book.rating)
        .with("description", &book.description)
        .with("local_url", file.path)
        .with("file_name", file.file_name)
        .with("image_url", &book.image_url)
        .with("language", &book.language)
        .with("tags_uuids", book.tag_ids.as_slice())
}

fn update_record(changes: &UpdateBook) -> Record {
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
        .with("image_url", &changes.image_url)
        .with("language", &changes.language)
        .with("tags_uuids", changes.tag_ids.as_slice())
}

fn book_from_row(row: &PgRow) -> Result<Book> {
    Ok(Book {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        direction: direction_from_row(row)?,
        author: author_from_row(row)?,
        difficulty: text_or_empty(row, "difficulty")?,
        edition_date: row.try_get("edition_date")?,
        rating: row.try_get("rating")?,
        description: text_or_empty(row, "description")?,
        local_url: text_or_empty(row, "local_url")?,
        file_name: text_or_empty(row, "file_name")?,
        image_url: text_or_empty(row, "image_url")?,
        language: text_or_empty(row, "language")?,
        download_count: row.try_get("download_count")?,
        tags: tags_from_row(row)?,
    })
}

#[async_trait]
impl BookRepository for PgBookRepository {
    #[instrument(skip(self))]
    async fn get_one(&self, id: &str) -> Result<Book> {
        self.table.fetch_one(id, book_from_row).await
    }

    #[instrument(skip(self, options))]
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Book>> {
        self.table.fetch_page(options, book_from_row).await
    }

    #[instrument(skip(self, book), fields(title = %book.title))]
    async fn create(&self, book: &CreateBook) -> Result<String> {
        let id = self.table.insert(&create_record(book)).await?;
        debug!(book_id = %id, "Book created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &UpdateBook) -> Result<()> {
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
