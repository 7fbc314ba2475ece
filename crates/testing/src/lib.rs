//! Testing utilities for the catalog store
//!
//! This crate provides:
//! - Fixtures producing realistic create payloads with `fake`
//! - Builder patterns for payloads tests want to control field by field
//! - In-memory implementations of the reference repositories
//! - A test database with the reference schema applied
//!
//! # Examples
//!
//! ```
//! use catalog_testing::{builders::*, fixtures::*};
//!
//! let author = create_test_author();
//! assert!(!author.full_name.is_empty());
//!
//! let book = BookBuilder::new()
//!     .with_title("Dune")
//!     .with_author("a1")
//!     .with_direction("d1")
//!     .with_tags(["t1"])
//!     .build();
//! assert_eq!(book.tag_ids, vec!["t1".to_string()]);
//! ```

pub mod builders;
pub mod database;
pub mod fixtures;
pub mod mocks;

// Re-export commonly used types
pub use builders::*;
pub use database::TestDatabase;
pub use fixtures::*;
pub use mocks::*;

// Re-export testing dependencies for convenience
pub use fake;
pub use proptest;
