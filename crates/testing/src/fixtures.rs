//! Test fixtures for generating catalog payloads with realistic data.
//!
//! Literature fixtures take the ids of the rows they reference, so a test
//! creates authors, directions and tags first and passes their ids on.

use chrono::NaiveDate;
use fake::{
    faker::{
        lorem::en::{Paragraph, Sentence, Word},
        name::en::Name,
    },
    Fake,
};
use proptest::prelude::*;

use catalog_domain::{
    CreateArticle, CreateAudio, CreateAuthor, CreateBook, CreateDirection, CreateReview,
    CreateTag, CreateVideo,
};

const DIFFICULTIES: [&str; 3] = ["beginner", "intermediate", "advanced"];
const LANGUAGES: [&str; 4] = ["en", "de", "fr", "uk"];

fn pick<'a>(options: &[&'a str]) -> &'a str {
    options[(0..options.len()).fake::<usize>()]
}

/// A random date between 1990 and 2023.
pub fn random_date() -> NaiveDate {
    NaiveDate::from_ymd_opt((1990..2024).fake(), (1..13).fake(), (1..29).fake())
        .unwrap_or_default()
}

/// A random rating on the 0.0 to 5.0 scale, never zero.
pub fn random_rating() -> f64 {
    let tenths: u32 = (1..51).fake();
    f64::from(tenths) / 10.0
}

/// A stored path with a display name, in the `path:name` form.
pub fn random_local_url(directory: &str, extension: &str) -> String {
    let stem: String = Word().fake();
    format!(
        "{directory}/{}.{extension}:{stem}.{extension}",
        uuid::Uuid::new_v4()
    )
}

pub fn create_test_author() -> CreateAuthor {
    CreateAuthor {
        full_name: Name().fake(),
    }
}

pub fn create_test_direction() -> CreateDirection {
    CreateDirection {
        name: Sentence(1..3).fake(),
    }
}

pub fn create_test_tag() -> CreateTag {
    CreateTag { name: Word().fake() }
}

/// Create an article payload referencing existing rows.
pub fn create_test_article(author_id: &str, direction_id: &str, tag_ids: &[String]) -> CreateArticle {
    CreateArticle {
        title: Sentence(2..6).fake(),
        direction_id: direction_id.to_string(),
        author_id: author_id.to_string(),
        difficulty: pick(&DIFFICULTIES).to_string(),
        edition_date: Some(random_date()),
        rating: random_rating(),
        description: Sentence(5..12).fake(),
        text: Paragraph(3..6).fake(),
        local_url: random_local_url("articles", "pdf"),
        language: pick(&LANGUAGES).to_string(),
        tag_ids: tag_ids.to_vec(),
    }
}

/// Create a book payload referencing existing rows.
pub fn create_test_book(author_id: &str, direction_id: &str, tag_ids: &[String]) -> CreateBook {
    CreateBook {
        title: Sentence(1..4).fake(),
        direction_id: direction_id.to_string(),
        author_id: author_id.to_string(),
        difficulty: pick(&DIFFICULTIES).to_string(),
        edition_date: Some(random_date()),
        rating: random_rating(),
        description: Paragraph(1..3).fake(),
        local_url: random_local_url("books", "pdf"),
        image_url: format!("covers/{}.jpg", uuid::Uuid::new_v4()),
        language: pick(&LANGUAGES).to_string(),
        tag_ids: tag_ids.to_vec(),
    }
}

pub fn create_test_audio(direction_id: &str, tag_ids: &[String]) -> CreateAudio {
    CreateAudio {
        title: Sentence(1..5).fake(),
        direction_id: direction_id.to_string(),
        difficulty: pick(&DIFFICULTIES).to_string(),
        creation_date: Some(random_date()),
        rating: random_rating(),
        local_url: random_local_url("audio", "mp3"),
        language: pick(&LANGUAGES).to_string(),
        tag_ids: tag_ids.to_vec(),
    }
}

pub fn create_test_video(direction_id: &str, tag_ids: &[String]) -> CreateVideo {
    CreateVideo {
        title: Sentence(1..5).fake(),
        direction_id: direction_id.to_string(),
        description: Sentence(4..10).fake(),
        creation_date: Some(random_date()),
        difficulty: pick(&DIFFICULTIES).to_string(),
        rating: random_rating(),
        local_url: random_local_url("videos", "mp4"),
        web_url: format!("https://video.example.org/watch/{}", uuid::Uuid::new_v4()),
        language: pick(&LANGUAGES).to_string(),
        tag_ids: tag_ids.to_vec(),
    }
}

/// Create a review of the literature item with `literature_id`.
pub fn create_test_review(literature_id: &str) -> CreateReview {
    CreateReview {
        full_name: Name().fake(),
        text: Paragraph(1..3).fake(),
        source: "catalog".to_string(),
        rating: random_rating(),
        date: Some(random_date()),
        literature_id: literature_id.to_string(),
    }
}

/// Tag names including the delimiters of composite array literals.
pub fn tag_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,12}",
        "[a-z]{1,6}, [a-z]{1,6}",
        "\\([a-z ]{0,8}\\)",
        "[a-z]{0,4}\"[a-z]{0,4}\"",
        "[ -~]{0,16}",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_fill_required_fields() {
        let tags = vec!["t1".to_string()];
        let book = create_test_book("a1", "d1", &tags);

        assert!(!book.title.is_empty());
        assert_eq!(book.author_id, "a1");
        assert_eq!(book.direction_id, "d1");
        assert_eq!(book.tag_ids, tags);
        assert!(book.local_url.starts_with("books/"));
        assert!(book.local_url.contains(':'));
    }

    #[test]
    fn test_random_values_stay_in_range() {
        for _ in 0..100 {
            let rating = random_rating();
            assert!(rating > 0.0 && rating <= 5.0);

            let date = random_date();
            assert!(date > NaiveDate::default());
        }
    }

    proptest! {
        #[test]
        fn prop_tag_names_are_printable(name in tag_name_strategy()) {
            prop_assert!(name.chars().all(|c| !c.is_control()));
        }
    }
}
