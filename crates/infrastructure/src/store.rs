//! Store facade.
//!
//! One [`Store`] is built at startup and handed to callers. It owns the
//! database pool and one handle per repository; cloning it is cheap.

use std::sync::Arc;

use catalog_common::config::AppConfig;
use tracing::info;

use crate::database::{DatabaseConfig, DatabasePool, HealthStatus};
use crate::repositories::{
    ArticleRepository, AudioRepository, AuthorRepository, BookRepository, DirectionRepository,
    PgArticleRepository, PgAudioRepository, PgAuthorRepository, PgBookRepository,
    PgDirectionRepository, PgReviewRepository, PgTagRepository, PgVideoRepository,
    ReviewRepository, TagRepository, VideoRepository,
};
use crate::Result;

/// All catalog repositories behind one handle.
#[derive(Clone)]
pub struct Store {
    pool: DatabasePool,
    articles: Arc<dyn ArticleRepository>,
    audio: Arc<dyn AudioRepository>,
    authors: Arc<dyn AuthorRepository>,
    books: Arc<dyn BookRepository>,
    directions: Arc<dyn DirectionRepository>,
    reviews: Arc<dyn ReviewRepository>,
    tags: Arc<dyn TagRepository>,
    videos: Arc<dyn VideoRepository>,
}

impl Store {
    /// Wire the PostgreSQL repositories to `pool`.
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            articles: Arc::new(PgArticleRepository::new(pool.clone())),
            audio: Arc::new(PgAudioRepository::new(pool.clone())),
            authors: Arc::new(PgAuthorRepository::new(pool.clone())),
            books: Arc::new(PgBookRepository::new(pool.clone())),
            directions: Arc::new(PgDirectionRepository::new(pool.clone())),
            reviews: Arc::new(PgReviewRepository::new(pool.clone())),
            tags: Arc::new(PgTagRepository::new(pool.clone())),
            videos: Arc::new(PgVideoRepository::new(pool.clone())),
            pool,
        }
    }

    /// Connect a pool and build the store on top of it.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let pool = DatabasePool::new(config).await?;
        info!("Catalog store ready");
        Ok(Self::new(pool))
    }

    /// Connect with the database section of the application configuration.
    pub async fn from_app_config(config: &AppConfig) -> Result<Self> {
        Self::connect(&DatabaseConfig::from(&config.database)).await
    }

    pub fn pool(&self) -> &DatabasePool {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<HealthStatus> {
        self.pool.health_check().await
    }

    pub fn articles(&self) -> &dyn ArticleRepository {
        self.articles.as_ref()
    }

    pub fn audio(&self) -> &dyn AudioRepository {
        self.audio.as_ref()
    }

    pub fn authors(&self) -> &dyn AuthorRepository {
        self.authors.as_ref()
    }

    pub fn books(&self) -> &dyn BookRepository {
        self.books.as_ref()
    }

    pub fn directions(&self) -> &dyn DirectionRepository {
        self.directions.as_ref()
    }

    pub fn reviews(&self) -> &dyn ReviewRepository {
        self.reviews.as_ref()
    }

    pub fn tags(&self) -> &dyn TagRepository {
        self.tags.as_ref()
    }

    pub fn videos(&self) -> &dyn VideoRepository {
        self.videos.as_ref()
    }

    /// Replace the author repository, e.g. with an in-memory one in tests.
    pub fn with_authors(mut self, authors: Arc<dyn AuthorRepository>) -> Self {
        self.authors = authors;
        self
    }

    pub fn with_directions(mut self, directions: Arc<dyn DirectionRepository>) -> Self {
        self.directions = directions;
        self
    }

    pub fn with_tags(mut self, tags: Arc<dyn TagRepository>) -> Self {
        self.tags = tags;
        self
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").field("pool", &self.pool).finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_store_builds_without_a_server() {
        let config = DatabaseConfig::test_config("postgres://nobody@127.0.0.1:1/none".to_string());
        let store = Store::new(DatabasePool::connect_lazy(&config).unwrap());

        let cloned = store.clone();
        assert_eq!(cloned.pool().stats().size, 0);
        assert!(format!("{store:?}").starts_with("Store"));
    }
}
