//! Audio repository implementation.
//!
//! Audio recordings reference a direction and tags but no author.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, Row};
use tracing::{debug, instrument};

use catalog_common::pagination::PaginatedResult;
use catalog_domain::{Audio, CreateAudio, LocalFile, UpdateAudio};

use super::{direction_from_row, tags_from_row, text_or_empty, EntityTable, ListOptions};
use crate::database::DatabasePool;
use crate::schema::{Record, AUDIO};
use crate::Result;

/// Repository trait for audio operations.
#[async_trait]
pub trait AudioRepository: Send + Sync {
    /// Get an audio recording with its direction and tags.
    async fn get_one(&self, id: &str) -> Result<Audio>;

    /// List audio recordings with filtering, sorting and pagination.
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Audio>>;

    /// Create an audio recording and return its id.
    async fn create(&self, audio: &CreateAudio) -> Result<String>;

    async fn delete(&self, id: &str) -> Result<()>;

    /// Apply a partial update.
    async fn update(&self, id: &str, changes: &UpdateAudio) -> Result<()>;

    /// Overwrite the rating.
    async fn rate(&self, id: &str, rating: f64) -> Result<()>;

    /// Increment the download counter by one.
    async fn download_count_up(&self, id: &str) -> Result<()>;
}

/// PostgreSQL implementation of AudioRepository.
#[derive(Debug, Clone)]
pub struct PgAudioRepository {
    table: EntityTable,
}

impl PgAudioRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            table: EntityTable::new(pool, AUDIO),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn audio_record(
    title: &str,
    direction_id: &str,
    difficulty: &str,
    creation_date: Option<chrono::NaiveDate>,
    rating: f64,
    local_url: &str,
    language: &str,
    tag_ids: &[String],
) -> Record {
    let file = LocalFile::split(local_url);
    Record::new()
        .with("title", title)
        .with("direction_uuid", direction_id)
        .with("difficulty", difficulty)
        .with("creation_date", creation_date)
        .with("rating", rating)
        .with("local_url", file.path)
        .with("file_name", file.file_name)
        .with("language", language)
        .with("tags_uuids", tag_ids)
}

fn create_record(audio: &CreateAudio) -> Record {
    audio_record(
        &audio.title,
        &audio.direction_id,
        &audio.difficulty,
        audio.creation_date,
        audio.rating,
        &audio.local_url,
        &audio.language,
        &audio.tag_ids,
    )
}

fn update_record(changes: &UpdateAudio) -> Record {
    audio_record(
        &changes.title,
        &changes.direction_id,
        &changes.difficulty,
        changes.creation_date,
        changes.rating,
        &changes.local_url,
        &changes.language,
        &changes.tag_ids,
    )
}

fn audio_from_row(row: &PgRow) -> Result<Audio> {
    Ok(Audio {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        direction: direction_from_row(row)?,
        difficulty: text_or_empty(row, "difficulty")?,
        creation_date: row.try_get("creation_date")?,
        rating: row.try_get("rating")?,
        local_url: text_or_empty(row, "local_url")?,
        file_name: text_or_empty(row, "file_name")?,
        language: text_or_empty(row, "language")?,
        download_count: row.try_get("download_count")?,
        tags: tags_from_row(row)?,
    })
}

#[async_trait]
impl AudioRepository for PgAudioRepository {
    #[instrument(skip(self))]
    async fn get_one(&self, id: &str) -> Result<Audio> {
        self.table.fetch_one(id, audio_from_row).await
    }

    #[instrument(skip(self, options))]
    async fn get_all(&self, options: ListOptions) -> Result<PaginatedResult<Audio>> {
        self.table.fetch_page(options, audio_from_row).await
    }

    #[instrument(skip(self, audio), fields(title = %audio.title))]
    async fn create(&self, audio: &CreateAudio) -> Result<String> {
        let id = self.table.insert(&create_record(audio)).await?;
        debug!(audio_id = %id, "Audio created successfully");
        Ok(id)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &str) -> Result<()> {
        self.table.delete(id).await
    }

    #[instrument(skip(self, changes))]
    async fn update(&self, id: &str, changes: &UpdateAudio) -> Result<()> {
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
    fn test_create_and_update_share_columns() {
        let create = CreateAudio {
            title: "Lecture 1".to_string(),
            direction_id: "d1".to_string(),
            local_url: "audio/a1.mp3:Lecture 1.mp3".to_string(),
            ..Default::default()
        };
        let update = UpdateAudio {
            title: "Lecture 1".to_string(),
            direction_id: "d1".to_string(),
            local_url: "audio/a1.mp3:Lecture 1.mp3".to_string(),
            ..Default::default()
        };

        assert_eq!(create_record(&create), update_record(&update));
        assert_eq!(
            create_record(&create).get("file_name"),
            Some(&SqlValue::from("Lecture 1.mp3"))
        );
        assert!(create_record(&create).get("author_uuid").is_none());
    }
}
