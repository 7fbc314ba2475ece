//! Catalog Domain Types
//!
//! This crate provides the domain model for the library/media catalog: the
//! literature items (articles, books, audio and video recordings), the
//! reference entities they point at (authors, directions, tags) and reviews.
//!
//! ## Architecture
//!
//! - **reference**: authors, directions and tags, the small lookup entities
//! - **literature**: articles, books, audio and video with their payloads
//! - **review**: reader reviews attached to a literature item
//! - **local_file**: splitting of the single "local url" input into the
//!   stored path and display name pair
//!
//! ## Payload conventions
//!
//! Every entity has a `Create*` payload carrying all required fields and an
//! `Update*` payload with partial-update semantics: a field left at its zero
//! value (empty string, `0`, `0.0`, `None`, empty vector) means "keep the
//! stored value".
//!
//! ```rust
//! use catalog_domain::literature::UpdateBook;
//!
//! let changes = UpdateBook {
//!     title: "Dune Messiah".to_string(),
//!     ..Default::default()
//! };
//! assert!(changes.description.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod literature;
pub mod local_file;
pub mod reference;
pub mod review;

pub use literature::{
    Article, Audio, Book, CreateArticle, CreateAudio, CreateBook, CreateVideo, UpdateArticle,
    UpdateAudio, UpdateBook, UpdateVideo, Video,
};
pub use local_file::LocalFile;
pub use reference::{
    Author, CreateAuthor, CreateDirection, CreateTag, Direction, Tag, UpdateAuthor,
    UpdateDirection, UpdateTag,
};
pub use review::{CreateReview, Review, UpdateReview};
