//! Reference entities shared by literature items.
//!
//! Authors and directions are referenced one-to-one from literature rows;
//! tags are referenced many-to-many through an identifier array stored on the
//! literature row itself.

use serde::{Deserialize, Serialize};

/// Author of an article or a book.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Surrogate key
    pub id: String,
    /// Full display name
    pub full_name: String,
}

/// Single-level topical category of a literature item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Direction {
    /// Surrogate key
    pub id: String,
    /// Category name
    pub name: String,
}

/// Free label attached to literature items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Surrogate key
    pub id: String,
    /// Label text
    pub name: String,
}

impl Tag {
    /// Create a tag from its parts.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Payload for creating an author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAuthor {
    /// Full display name
    pub full_name: String,
}

/// Partial update of an author. An empty name keeps the stored one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateAuthor {
    /// New full name, or empty to keep the stored value
    pub full_name: String,
}

/// Payload for creating a direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateDirection {
    /// Category name
    pub name: String,
}

/// Partial update of a direction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateDirection {
    /// New name, or empty to keep the stored value
    pub name: String,
}

/// Payload for creating a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTag {
    /// Label text
    pub name: String,
}

/// Partial update of a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTag {
    /// New label, or empty to keep the stored value
    pub name: String,
}
