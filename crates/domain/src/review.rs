//! Reader reviews.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A review of a literature item.
///
/// `literature_id` may point at an article, book, audio or video row; the
/// reference is a convention and is not checked by the database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Surrogate key
    pub id: String,
    /// Reviewer's full name
    pub full_name: String,
    /// Review body
    pub text: String,
    /// Where the review was published
    pub source: String,
    /// Score given by the reviewer
    pub rating: f64,
    /// Publication date
    pub date: Option<NaiveDate>,
    /// Reviewed literature item
    pub literature_id: String,
}

/// Payload for creating a review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateReview {
    /// Reviewer's full name
    pub full_name: String,
    /// Review body
    pub text: String,
    /// Where the review was published
    pub source: String,
    /// Score given by the reviewer
    pub rating: f64,
    /// Publication date
    pub date: Option<NaiveDate>,
    /// Reviewed literature item
    pub literature_id: String,
}

/// Partial update of a review.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateReview {
    /// New reviewer name
    pub full_name: String,
    /// New body
    pub text: String,
    /// New source
    pub source: String,
    /// New rating
    pub rating: f64,
    /// New date
    pub date: Option<NaiveDate>,
    /// New reviewed item
    pub literature_id: String,
}
