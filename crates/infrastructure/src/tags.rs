//! Decoding of aggregated tag columns.
//!
//! Listings aggregate the joined tag rows with
//! `array_agg(DISTINCT ROW(t.id, t.name))` and cast the result to text, which
//! PostgreSQL renders as an array of composite literals:
//!
//! ```text
//! {"(5d0c...,fiction)","(9a41...,\"sci-fi, classic\")"}
//! ```
//!
//! Array elements are double quoted with backslash escapes. Inside a
//! composite, fields containing delimiters are double quoted, with `""` for
//! an embedded quote and `\\` for a backslash. Both layers are honored, so
//! tag names may contain commas, parentheses and quotes.

use catalog_domain::Tag;
use thiserror::Error;

/// Failure to decode an aggregated tag column.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagDecodeError {
    #[error("tag array is not enclosed in braces: {0}")]
    MissingBraces(String),

    #[error("unterminated quoted value in {0}")]
    UnterminatedQuote(String),

    #[error("unexpected character {found:?} after array element in {input}")]
    UnexpectedCharacter { found: char, input: String },

    #[error("tag element is not a composite literal: {0}")]
    MissingParentheses(String),

    #[error("tag element has {found} fields, expected 2: {element}")]
    FieldCount { found: usize, element: String },

    #[error("tag element has a null identifier: {0}")]
    NullIdentifier(String),
}

/// Decode the text form of an aggregated `(id, name)` array.
///
/// An empty string or `{}` decodes to no tags. `NULL` elements are skipped.
/// Order follows the input, which for a DISTINCT aggregate is unspecified.
pub fn decode_tags(input: &str) -> Result<Vec<Tag>, TagDecodeError> {
    split_array(input)?
        .into_iter()
        .flatten()
        .map(|element| decode_composite(&element))
        .collect()
}

fn split_array(input: &str) -> Result<Vec<Option<String>>, TagDecodeError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let inner = trimmed
        .strip_prefix('{')
        .and_then(|s| s.strip_suffix('}'))
        .ok_or_else(|| TagDecodeError::MissingBraces(input.to_string()))?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut elements = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while chars.peek().is_some_and(|c| c.is_whitespace()) {
            chars.next();
        }

        if chars.peek() == Some(&'"') {
            chars.next();
            let mut value = String::new();
            let mut closed = false;
            while let Some(c) = chars.next() {
                match c {
                    '\\' => match chars.next() {
                        Some(escaped) => value.push(escaped),
                        None => break,
                    },
                    '"' => {
                        closed = true;
                        break;
                    }
                    other => value.push(other),
                }
            }
            if !closed {
                return Err(TagDecodeError::UnterminatedQuote(input.to_string()));
            }
            elements.push(Some(value));
            while chars.peek().is_some_and(|c| c.is_whitespace()) {
                chars.next();
            }
        } else {
            // Unquoted composites still nest their commas inside parentheses.
            let mut value = String::new();
            let mut depth = 0usize;
            while let Some(&c) = chars.peek() {
                match c {
                    ',' if depth == 0 => break,
                    '(' => depth += 1,
                    ')' => depth = depth.saturating_sub(1),
                    _ => {}
                }
                value.push(c);
                chars.next();
            }
            let value = value.trim();
            if value.eq_ignore_ascii_case("NULL") {
                elements.push(None);
            } else {
                elements.push(Some(value.to_string()));
            }
        }

        match chars.next() {
            Some(',') => continue,
            None => break,
            Some(found) => {
                return Err(TagDecodeError::UnexpectedCharacter {
                    found,
                    input: input.to_string(),
                })
            }
        }
    }

    Ok(elements)
}

fn decode_composite(element: &str) -> Result<Tag, TagDecodeError> {
    let inner = element
        .trim()
        .strip_prefix('(')
        .and_then(|s| s.strip_suffix(')'))
        .ok_or_else(|| TagDecodeError::MissingParentheses(element.to_string()))?;

    let mut fields: Vec<Option<String>> = Vec::with_capacity(2);
    let mut chars = inner.chars().peekable();

    loop {
        let mut value = String::new();
        let mut quoted = false;

        while let Some(&c) = chars.peek() {
            match c {
                ',' => break,
                '"' => {
                    chars.next();
                    quoted = true;
                    loop {
                        match chars.next() {
                            Some('"') if chars.peek() == Some(&'"') => {
                                chars.next();
                                value.push('"');
                            }
                            Some('"') => break,
                            Some('\\') => match chars.next() {
                                Some(escaped) => value.push(escaped),
                                None => {
                                    return Err(TagDecodeError::UnterminatedQuote(
                                        element.to_string(),
                                    ))
                                }
                            },
                            Some(other) => value.push(other),
                            None => {
                                return Err(TagDecodeError::UnterminatedQuote(element.to_string()))
                            }
                        }
                    }
                }
                '\\' => {
                    chars.next();
                    if let Some(escaped) = chars.next() {
                        value.push(escaped);
                    }
                }
                other => {
                    value.push(other);
                    chars.next();
                }
            }
        }

        // An empty unquoted field is NULL.
        fields.push((quoted || !value.is_empty()).then_some(value));

        if chars.next().is_none() {
            break;
        }
    }

    if fields.len() != 2 {
        return Err(TagDecodeError::FieldCount {
            found: fields.len(),
            element: element.to_string(),
        });
    }

    let mut fields = fields.into_iter();
    let id = fields
        .next()
        .flatten()
        .ok_or_else(|| TagDecodeError::NullIdentifier(element.to_string()))?;
    let name = fields.next().flatten().unwrap_or_default();

    Ok(Tag::new(id, name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn composite_field(value: &str) -> String {
        let needs_quotes = value.is_empty()
            || value
                .chars()
                .any(|c| matches!(c, ',' | '(' | ')' | '"' | '\\') || c.is_whitespace());
        if needs_quotes {
            format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\"\""))
        } else {
            value.to_string()
        }
    }

    /// Render tags the way PostgreSQL prints `record[]` as text.
    fn render(tags: &[Tag]) -> String {
        let elements: Vec<String> = tags
            .iter()
            .map(|tag| {
                let composite = format!(
                    "({},{})",
                    composite_field(&tag.id),
                    composite_field(&tag.name)
                );
                format!(
                    "\"{}\"",
                    composite.replace('\\', "\\\\").replace('"', "\\\"")
                )
            })
            .collect();
        format!("{{{}}}", elements.join(","))
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(decode_tags("").unwrap(), vec![]);
        assert_eq!(decode_tags("{}").unwrap(), vec![]);
        assert_eq!(decode_tags("  { } ").unwrap(), vec![]);
    }

    #[test]
    fn test_simple_elements() {
        let tags = decode_tags(r#"{"(t1,fiction)","(t2,poetry)"}"#).unwrap();
        assert_eq!(tags, vec![Tag::new("t1", "fiction"), Tag::new("t2", "poetry")]);
    }

    #[test]
    fn test_unquoted_elements() {
        let tags = decode_tags("{(t1,fiction),(t2,poetry)}").unwrap();
        assert_eq!(tags, vec![Tag::new("t1", "fiction"), Tag::new("t2", "poetry")]);
    }

    #[test]
    fn test_delimiters_inside_names() {
        let input = r#"{"(t1,\"sci-fi, classic\")","(t2,\"notes (draft)\")","(t3,\"say \"\"hi\"\"\")"}"#;
        let tags = decode_tags(input).unwrap();
        assert_eq!(
            tags,
            vec![
                Tag::new("t1", "sci-fi, classic"),
                Tag::new("t2", "notes (draft)"),
                Tag::new("t3", "say \"hi\""),
            ]
        );
    }

    #[test]
    fn test_backslash_in_name() {
        let input = r#"{"(t1,\"back\\\\slash\")"}"#;
        assert_eq!(decode_tags(input).unwrap(), vec![Tag::new("t1", "back\\slash")]);
    }

    #[test]
    fn test_null_elements_and_fields() {
        let tags = decode_tags(r#"{NULL,"(t1,)","(t2,\"\")"}"#).unwrap();
        assert_eq!(tags, vec![Tag::new("t1", ""), Tag::new("t2", "")]);
    }

    #[test]
    fn test_malformed_inputs() {
        assert!(matches!(
            decode_tags("(t1,fiction)"),
            Err(TagDecodeError::MissingBraces(_))
        ));
        assert!(matches!(
            decode_tags(r#"{"(t1,fiction)"#),
            Err(TagDecodeError::MissingBraces(_))
        ));
        assert!(matches!(
            decode_tags(r#"{"(t1,fiction)}"#),
            Err(TagDecodeError::UnterminatedQuote(_))
        ));
        assert!(matches!(
            decode_tags(r#"{"t1,fiction"}"#),
            Err(TagDecodeError::MissingParentheses(_))
        ));
        assert!(matches!(
            decode_tags(r#"{"(t1,fiction,extra)"}"#),
            Err(TagDecodeError::FieldCount { found: 3, .. })
        ));
        assert!(matches!(
            decode_tags(r#"{"(,fiction)"}"#),
            Err(TagDecodeError::NullIdentifier(_))
        ));
    }

    proptest! {
        #[test]
        fn prop_decodes_rendered_tags(
            tags in prop::collection::hash_set(
                ("[0-9a-f]{8}-[0-9a-f]{4}", "[ -~]{0,24}"),
                0..8,
            )
        ) {
            let tags: Vec<Tag> = tags.into_iter().map(|(id, name)| Tag::new(id, name)).collect();
            let decoded = decode_tags(&render(&tags)).unwrap();

            prop_assert_eq!(decoded.len(), tags.len());
            let expected: HashSet<Tag> = tags.into_iter().collect();
            let actual: HashSet<Tag> = decoded.into_iter().collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_never_panics(input in "\\PC{0,64}") {
            let _ = decode_tags(&input);
        }
    }
}
