//! Video repository implementation.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, instrument};

use catalog_common::pagination::PaginatedResult;
use catalog_domain::{CreateVideo, LocalFile, UpdateVideo, Video};

use super::{direction_from_row, tags_from_row, text_or_empty, EntityTable, ListOptions};
use crate::database::DatabasePool;
use crate::schema::{Record, VIDEOS};
use crate::Result;

/// Repository trait for video operations.
#[async_trait]
pub trait VideoRepository: Send + Sync {
    /// Get a video with its direction and tags.
    async fn get_one(&self, id: &str) -> Result<Video>;

    /// List videos with filtering, sorting and pagination.
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Video>>;

    /// Create a video and return its id.
    async fn create(&self, video: &CreateVideo) -> Result<String>;

    /// Delete a video.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Apply a partial update.
    async fn update(&self, id: &str, changes: &UpdateVideo) -> Result<()>;

    /// Overwrite the rating.
    async fn rate(&self, id: &str, rating: f64) -> Result<()>;

    /// Increment the download counter by one.
    async fn download_count_up(&self, id: &str) -> Result<()>;
}

/// PostgreSQL implementation of VideoRepository.
#[derive(Debug, Clone)]
pub struct PgVideoRepository {
    table: EntityTable,
}

impl PgVideoRepository {
    /// Create a new PostgreSQL video repository.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            table: EntityTable::new(pool, VIDEOS),
        }
    }
}

fn create_record(video: &CreateVideo) -> Record {
    let file = LocalFile::split(&video.local_url);
    Record::new()
        .with("title", &video.title)
        .with("direction_uuid", &video.direction_id)
        .with("description", &video.description)
        .with("creation_date", video.creation_date)
        .with("difficulty", &video.difficulty)
        .with("rating", video.rating)
        .with("local_url", file.path)
        .with("file_name", file.file_name)
        .with("web_url", &video.web_url)
        .with("language", &video.language)
        .with("tags_uuids", video.tag_ids.as_slice())
}

fn update_record(changes: &UpdateVideo) -> Record {
    let file = LocalFile::split(&changes.local_url);
    Record::new()
        .with("title", &changes.title)
        .with("direction_uuid", &changes.direction_id)
        .with("description", &changes.description)
        .with("creation_date", changes.creation_date)
        .with("difficulty", &changes.difficulty)
        .with("rating", changes.rating)
        .with("local_url", file.path)
        .with("file_name", file.file_name)
        .with("web_url", &changes.web_url)
        .with("language", &changes.language)
        .with("tags_uuids", changes.tag_ids.as_slice())
}

fn video_from_row(row: &PgRow) -> Result<Video> {
    Ok(Video {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        direction: direction_from_row(row)?,
        description: text_or_empty(row, "description")?,
        creation_date: row.try_get("creation_date")?,
        difficulty: text_or_empty(row, "difficulty")?,
        rating: row.try_get("rating")?,
        local_url: text_or_empty(row, "local_url")?,
        file_name: text_or_empty(row, "file_name")?,
        web_url: text_or_empty(row, "web_url")?,
        language: text_or_empty(row, "language")?,
        download_count: row.try_get("download_count")?,
        tags: tags_from_row(row)?,
    })
}

#[async_trait]
impl VideoRepository for PgVideoRepository {
    #[instrument(skip(self))]
    async fn get_one(&self, id: &str) -> Result<Video> {
        self.table.fetch_one(id, video_from_row).await
    }

    #[instrument(skip(self, options))]
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Video>> {
        self.table.fetch_page(options, video_from_row).await
    }

    #[instrument(skip(self, video), fields(title = %video.title))]
    async fn create(&self, video: &CreateVideo) -> Result<String> {
        let id = self.table.insert(&create_record(video)).await?;
        debug!(video_id = %id, "Video created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &UpdateVideo) -> Result<()> {
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
    fn test_web_url_is_kept_whole() {
        let video = CreateVideo {
            title: "Borrowing explained".to_string(),
            local_url: "videos/v1.mp4:Part 1: Intro.mp4".to_string(),
            web_url: "https://video.example.org/watch?v=1".to_string(),
            ..Default::default()
        };

        let record = create_record(&video);
        assert_eq!(
            record.get("web_url"),
            Some(&SqlValue::from("https://video.example.org/watch?v=1"))
        );
        assert_eq!(record.get("local_url"), Some(&SqlValue::from("videos/v1.mp4")));
        assert_eq!(record.get("file_name"), Some(&SqlValue::from("Part 1: Intro.mp4")));
    }
}
