//! Literature items: articles, books, audio and video recordings.
//!
//! All four share the same shape: a title, a difficulty label, a rating, a
//! download counter, one direction and a set of tags. Articles and books
//! also reference an author.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::reference::{Author, Direction, Tag};

/// A published article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Article {
    /// Surrogate key
    pub id: String,
    /// Title
    pub title: String,
    /// Topical category
    pub direction: Direction,
    /// Writer of the article
    pub author: Author,
    /// Difficulty label (e.g. "beginner")
    pub difficulty: String,
    /// Date of the edition, when known
    pub edition_date: Option<NaiveDate>,
    /// Score, 0.0 to 5.0 by convention
    pub rating: f64,
    /// Short description
    pub description: String,
    /// Full text
    pub text: String,
    /// Path of the stored file
    pub local_url: String,
    /// Name presented on download
    pub file_name: String,
    /// Language code
    pub language: String,
    /// Number of downloads so far
    pub download_count: i64,
    /// Attached tags
    pub tags: Vec<Tag>,
}

/// Payload for creating an article.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateArticle {
    /// Title
    pub title: String,
    /// Referenced direction
    pub direction_id: String,
    /// Referenced author
    pub author_id: String,
    /// Difficulty label
    pub difficulty: String,
    /// Date of the edition
    pub edition_date: Option<NaiveDate>,
    /// Initial rating
    pub rating: f64,
    /// Short description
    pub description: String,
    /// Full text
    pub text: String,
    /// `"<stored path>:<display name>"`, see [`crate::LocalFile`]
    pub local_url: String,
    /// Language code
    pub language: String,
    /// Referenced tags
    pub tag_ids: Vec<String>,
}

/// Partial update of an article; zero values keep the stored column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateArticle {
    /// New title
    pub title: String,
    /// New direction; ignored unless it exists
    pub direction_id: String,
    /// New author; ignored unless it exists
    pub author_id: String,
    /// New difficulty label
    pub difficulty: String,
    /// New edition date
    pub edition_date: Option<NaiveDate>,
    /// New rating
    pub rating: f64,
    /// New description
    pub description: String,
    /// New full text
    pub text: String,
    /// New local url, split like on create
    pub local_url: String,
    /// New language code
    pub language: String,
    /// Replacement tag set; ignored unless every tag exists
    pub tag_ids: Vec<String>,
}

/// A book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Surrogate key
    pub id: String,
    /// Title
    pub title: String,
    /// Topical category
    pub direction: Direction,
    /// Writer of the book
    pub author: Author,
    /// Difficulty label
    pub difficulty: String,
    /// Date of the edition, when known
    pub edition_date: Option<NaiveDate>,
    /// Score
    pub rating: f64,
    /// Short description
    pub description: String,
    /// Path of the stored file
    pub local_url: String,
    /// Name presented on download
    pub file_name: String,
    /// Cover image
    pub image_url: String,
    /// Language code
    pub language: String,
    /// Number of downloads so far
    pub download_count: i64,
    /// Attached tags
    pub tags: Vec<Tag>,
}

/// Payload for creating a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateBook {
    /// Title
    pub title: String,
    /// Referenced direction
    pub direction_id: String,
    /// Referenced author
    pub author_id: String,
    /// Difficulty label
    pub difficulty: String,
    /// Date of the edition
    pub edition_date: Option<NaiveDate>,
    /// Initial rating
    pub rating: f64,
    /// Short description
    pub description: String,
    /// `"<stored path>:<display name>"`
    pub local_url: String,
    /// Cover image
    pub image_url: String,
    /// Language code
    pub language: String,
    /// Referenced tags
    pub tag_ids: Vec<String>,
}

/// Partial update of a book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateBook {
    /// New title
    pub title: String,
    /// New direction; ignored unless it exists
    pub direction_id: String,
    /// New author; ignored unless it exists
    pub author_id: String,
    /// New difficulty label
    pub difficulty: String,
    /// New edition date
    pub edition_date: Option<NaiveDate>,
    /// New rating
    pub rating: f64,
    /// New description
    pub description: String,
    /// New local url
    pub local_url: String,
    /// New cover image
    pub image_url: String,
    /// New language code
    pub language: String,
    /// Replacement tag set
    pub tag_ids: Vec<String>,
}

/// An audio recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Audio {
    /// Surrogate key
    pub id: String,
    /// Title
    pub title: String,
    /// Topical category
    pub direction: Direction,
    /// Difficulty label
    pub difficulty: String,
    /// Recording date, when known
    pub creation_date: Option<NaiveDate>,
    /// Score
    pub rating: f64,
    /// Path of the stored file
    pub local_url: String,
    /// Name presented on download
    pub file_name: String,
    /// Language code
    pub language: String,
    /// Number of downloads so far
    pub download_count: i64,
    /// Attached tags
    pub tags: Vec<Tag>,
}

/// Payload for creating an audio recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateAudio {
    /// Title
    pub title: String,
    /// Referenced direction
    pub direction_id: String,
    /// Difficulty label
    pub difficulty: String,
    /// Recording date
    pub creation_date: Option<NaiveDate>,
    /// Initial rating
    pub rating: f64,
    /// `"<stored path>:<display name>"`
    pub local_url: String,
    /// Language code
    pub language: String,
    /// Referenced tags
    pub tag_ids: Vec<String>,
}

/// Partial update of an audio recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateAudio {
    /// New title
    pub title: String,
    /// New direction; ignored unless it exists
    pub direction_id: String,
    /// New difficulty label
    pub difficulty: String,
    /// New recording date
    pub creation_date: Option<NaiveDate>,
    /// New rating
    pub rating: f64,
    /// New local url
    pub local_url: String,
    /// New language code
    pub language: String,
    /// Replacement tag set
    pub tag_ids: Vec<String>,
}

/// A video recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Video {
    /// Surrogate key
    pub id: String,
    /// Title
    pub title: String,
    /// Topical category
    pub direction: Direction,
    /// Short description
    pub description: String,
    /// Recording date, when known
    pub creation_date: Option<NaiveDate>,
    /// Difficulty label
    pub difficulty: String,
    /// Score
    pub rating: f64,
    /// Path of the stored file
    pub local_url: String,
    /// Name presented on download
    pub file_name: String,
    /// Hosted copy of the video
    pub web_url: String,
    /// Language code
    pub language: String,
    /// Number of downloads so far
    pub download_count: i64,
    /// Attached tags
    pub tags: Vec<Tag>,
}

/// Payload for creating a video recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateVideo {
    /// Title
    pub title: String,
    /// Referenced direction
    pub direction_id: String,
    /// Short description
    pub description: String,
    /// Recording date
    pub creation_date: Option<NaiveDate>,
    /// Difficulty label
    pub difficulty: String,
    /// Initial rating
    pub rating: f64,
    /// `"<stored path>:<display name>"`
    pub local_url: String,
    /// Hosted copy of the video
    pub web_url: String,
    /// Language code
    pub language: String,
    /// Referenced tags
    pub tag_ids: Vec<String>,
}

/// Partial update of a video recording.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateVideo {
    /// New title
    pub title: String,
    /// New direction; ignored unless it exists
    pub direction_id: String,
    /// New description
    pub description: String,
    /// New recording date
    pub creation_date: Option<NaiveDate>,
    /// New difficulty label
    pub difficulty: String,
    /// New rating
    pub rating: f64,
    /// New local url
    pub local_url: String,
    /// New hosted copy
    pub web_url: String,
    /// New language code
    pub language: String,
    /// Replacement tag set
    pub tag_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_payload_defaults_keep_everything() {
        let changes = UpdateArticle::default();
        assert!(changes.title.is_empty());
        assert_eq!(changes.rating, 0.0);
        assert!(changes.edition_date.is_none());
        assert!(changes.tag_ids.is_empty());
    }

    #[test]
    fn test_book_serializes_nested_references() {
        let book = Book {
            id: "b1".to_string(),
            title: "Dune".to_string(),
            author: Author {
                id: "a1".to_string(),
                full_name: "Frank Herbert".to_string(),
            },
            tags: vec![Tag::new("t1", "fiction")],
            ..Default::default()
        };

        let json = serde_json::to_value(&book).unwrap();
        assert_eq!(json["author"]["full_name"], "Frank Herbert");
        assert_eq!(json["tags"][0]["name"], "fiction");

        let back: Book = serde_json::from_value(json).unwrap();
        assert_eq!(back, book);
    }
}
