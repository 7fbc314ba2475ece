//! Fluent builder pattern for constructing test payloads.
//!
//! Builders start from fixed, readable values so assertions can name them;
//! use the `fixtures` module when the values do not matter.

use chrono::NaiveDate;

use catalog_domain::{CreateArticle, CreateBook, CreateReview, UpdateBook};

fn fixed_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 15).unwrap_or_default()
}

fn ids<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

/// Builder for book create payloads
#[derive(Clone)]
pub struct BookBuilder {
    book: CreateBook,
}

impl BookBuilder {
    pub fn new() -> Self {
        Self {
            book: CreateBook {
                title: "Test Book".to_string(),
                difficulty: "beginner".to_string(),
                edition_date: Some(fixed_date()),
                rating: 4.5,
                description: "A book used in tests".to_string(),
                local_url: "books/test-book.pdf:Test Book.pdf".to_string(),
                image_url: "covers/test-book.jpg".to_string(),
                language: "en".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.book.title = title.into();
        self
    }

    pub fn with_author(mut self, author_id: impl Into<String>) -> Self {
        self.book.author_id = author_id.into();
        self
    }

    pub fn with_direction(mut self, direction_id: impl Into<String>) -> Self {
        self.book.direction_id = direction_id.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.book.tag_ids = ids(tag_ids);
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.book.rating = rating;
        self
    }

    pub fn with_edition_date(mut self, date: Option<NaiveDate>) -> Self {
        self.book.edition_date = date;
        self
    }

    pub fn with_local_url(mut self, local_url: impl Into<String>) -> Self {
        self.book.local_url = local_url.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.book.language = language.into();
        self
    }

    pub fn build(self) -> CreateBook {
        self.book
    }
}

impl Default for BookBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for article create payloads
#[derive(Clone)]
pub struct ArticleBuilder {
    article: CreateArticle,
}

impl ArticleBuilder {
    pub fn new() -> Self {
        Self {
            article: CreateArticle {
                title: "Test Article".to_string(),
                difficulty: "intermediate".to_string(),
                edition_date: Some(fixed_date()),
                rating: 3.5,
                description: "An article used in tests".to_string(),
                text: "Body of the test article.".to_string(),
                local_url: "articles/test-article.pdf:Test Article.pdf".to_string(),
                language: "en".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.article.title = title.into();
        self
    }

    pub fn with_author(mut self, author_id: impl Into<String>) -> Self {
        self.article.author_id = author_id.into();
        self
    }

    pub fn with_direction(mut self, direction_id: impl Into<String>) -> Self {
        self.article.direction_id = direction_id.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.article.tag_ids = ids(tag_ids);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.article.text = text.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.article.language = language.into();
        self
    }

    pub fn build(self) -> CreateArticle {
        self.article
    }
}

impl Default for ArticleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for review create payloads
#[derive(Clone)]
pub struct ReviewBuilder {
    review: CreateReview,
}

impl ReviewBuilder {
    pub fn new() -> Self {
        Self {
            review: CreateReview {
                full_name: "Test Reviewer".to_string(),
                text: "Worth reading.".to_string(),
                source: "tests".to_string(),
                rating: 4.0,
                date: Some(fixed_date()),
                literature_id: String::new(),
            },
        }
    }

    pub fn for_literature(mut self, literature_id: impl Into<String>) -> Self {
        self.review.literature_id = literature_id.into();
        self
    }

    pub fn with_full_name(mut self, full_name: impl Into<String>) -> Self {
        self.review.full_name = full_name.into();
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.review.text = text.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.review.rating = rating;
        self
    }

    pub fn build(self) -> CreateReview {
        self.review
    }
}

impl Default for ReviewBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for partial book updates. Every field starts as "keep".
#[derive(Clone, Default)]
pub struct BookUpdateBuilder {
    changes: UpdateBook,
}

impl BookUpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.changes.title = title.into();
        self
    }

    pub fn author(mut self, author_id: impl Into<String>) -> Self {
        self.changes.author_id = author_id.into();
        self
    }

    pub fn direction(mut self, direction_id: impl Into<String>) -> Self {
        self.changes.direction_id = direction_id.into();
        self
    }

    pub fn tags<I, S>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.changes.tag_ids = ids(tag_ids);
        self
    }

    pub fn rating(mut self, rating: f64) -> Self {
        self.changes.rating = rating;
        self
    }

    pub fn build(self) -> UpdateBook {
        self.changes
    }
}
