//! Local file references of literature items.
//!
//! Callers hand over one logical "local url" string. It is stored as two
//! columns: the path of the stored file and the name shown to readers when
//! the file is downloaded. The input format is `"<stored path>:<display name>"`;
//! when no delimiter is present the display name is the final path segment.

use serde::{Deserialize, Serialize};

/// Separator between the stored path and the display name.
pub const LOCAL_URL_DELIMITER: char = ':';

/// A stored file path paired with its download name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalFile {
    /// Path of the stored file
    pub path: String,
    /// Name presented on download
    pub file_name: String,
}

impl LocalFile {
    /// Split a caller-supplied local url into path and display name.
    ///
    /// ```
    /// use catalog_domain::LocalFile;
    ///
    /// let file = LocalFile::split("books/3f1c.pdf:Dune.pdf");
    /// assert_eq!(file.path, "books/3f1c.pdf");
    /// assert_eq!(file.file_name, "Dune.pdf");
    ///
    /// let file = LocalFile::split("books/3f1c.pdf");
    /// assert_eq!(file.file_name, "3f1c.pdf");
    /// ```
    pub fn split(local_url: &str) -> Self {
        match local_url.split_once(LOCAL_URL_DELIMITER) {
            Some((path, file_name)) => Self {
                path: path.to_string(),
                file_name: file_name.to_string(),
            },
            None => Self {
                path: local_url.to_string(),
                file_name: local_url
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string(),
            },
        }
    }

    /// Whether nothing was supplied.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.file_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_delimiter() {
        let file = LocalFile::split("audio/a1.mp3:Lecture 1.mp3");
        assert_eq!(file.path, "audio/a1.mp3");
        assert_eq!(file.file_name, "Lecture 1.mp3");
    }

    #[test]
    fn test_split_only_first_delimiter() {
        let file = LocalFile::split("v/1.mp4:Part 1: Intro.mp4");
        assert_eq!(file.path, "v/1.mp4");
        assert_eq!(file.file_name, "Part 1: Intro.mp4");
    }

    #[test]
    fn test_split_without_delimiter_uses_last_segment() {
        let file = LocalFile::split("articles/2024/intro.pdf");
        assert_eq!(file.path, "articles/2024/intro.pdf");
        assert_eq!(file.file_name, "intro.pdf");

        let file = LocalFile::split("intro.pdf");
        assert_eq!(file.file_name, "intro.pdf");
    }

    #[test]
    fn test_split_empty() {
        let file = LocalFile::split("");
        assert!(file.is_empty());
    }
}
