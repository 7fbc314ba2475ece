//! Data-access layer of the catalog store.
//!
//! This crate provides:
//! - Database access (PostgreSQL with sqlx)
//! - A statement builder with dialect placeholder formatting
//! - Table metadata driving every generated statement
//! - Repository traits and PostgreSQL implementations per entity
//! - The [`Store`] facade wiring them to one pool
//!
//! ## Usage
//!
//! ```rust,ignore
//! use catalog_infrastructure::{DatabaseConfig, ListOptions, Store};
//! use catalog_common::pagination::{PageRequest, SortParams};
//!
//! let store = Store::connect(&DatabaseConfig::from_env()?).await?;
//!
//! let books = store
//!     .books()
//!     .get_all(
//!         ListOptions::new()
//!             .sort(SortParams::desc("rating"))
//!             .page(PageRequest::new(1, 20)),
//!     )
//!     .await?;
//! ```

pub mod database;
pub mod query;
pub mod repositories;
pub mod schema;
pub mod store;
pub mod tags;

pub use database::{DatabaseConfig, DatabasePool, HealthStatus, PoolStats, TransactionExt};
pub use query::{Comparison, Predicate, SqlValue};
pub use repositories::{
    reviews_of, tag_filter, ArticleRepository, AudioRepository, AuthorRepository,
    BookRepository, DirectionRepository, ListOptions, PgArticleRepository, PgAudioRepository,
    PgAuthorRepository, PgBookRepository, PgDirectionRepository, PgReviewRepository,
    PgTagRepository, PgVideoRepository, ReviewRepository, TagRepository, VideoRepository,
};
pub use store::Store;
pub use tags::{decode_tags, TagDecodeError};

pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Statement, connection or transaction failure reported by sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A read matched no row
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// A mutation matched no row; the transaction was rolled back
    #[error("no rows affected for {entity} {id}")]
    NoRowsAffected { entity: &'static str, id: String },

    /// An insert was rejected because a referenced row does not exist
    #[error("{entity} not created: a referenced row does not exist")]
    CreateRejected { entity: &'static str },

    /// The aggregated tag column could not be decoded
    #[error("Tag decode error: {0}")]
    TagDecode(#[from] TagDecodeError),

    /// Caller input rejected before reaching the database
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Whether the error means "no such row", the normal recoverable case.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. } | Error::NoRowsAffected { .. })
    }

    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Error::Database(sqlx::Error::PoolTimedOut)
                | Error::Database(sqlx::Error::PoolClosed)
                | Error::Database(sqlx::Error::Io(_))
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_kinds() {
        let not_found = Error::NotFound {
            entity: "book",
            id: "b1".to_string(),
        };
        assert!(not_found.is_not_found());
        assert_eq!(not_found.to_string(), "book b1 not found");

        let no_rows = Error::NoRowsAffected {
            entity: "tag",
            id: "t1".to_string(),
        };
        assert!(no_rows.is_not_found());

        assert!(!Error::CreateRejected { entity: "book" }.is_not_found());
        assert!(!Error::Database(sqlx::Error::RowNotFound).is_not_found());
    }

    #[test]
    fn test_error_retryable() {
        assert!(Error::Database(sqlx::Error::PoolTimedOut).is_retryable());
        assert!(!Error::Configuration("bad config".to_string()).is_retryable());
        assert!(!Error::NotFound {
            entity: "author",
            id: "a1".to_string()
        }
        .is_retryable());
    }

    #[test]
    fn test_tag_decode_error_converts() {
        let err: Error = decode_tags("not an array").unwrap_err().into();
        assert!(matches!(err, Error::TagDecode(TagDecodeError::MissingBraces(_))));
    }
}
