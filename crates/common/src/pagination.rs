//! Pagination and sorting utilities.
//!
//! Listings are unbounded unless a limit is given: a zero limit means "return
//! every row" and a zero page means "start at the first row".

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page and limit requested by a caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed, 0 means unset)
    #[serde(default)]
    pub page: u32,

    /// Items per page (0 means no limit)
    #[serde(default)]
    pub limit: u32,
}

impl PageRequest {
    /// Create new pagination parameters.
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Request every row.
    pub fn unbounded() -> Self {
        Self::default()
    }

    /// LIMIT to apply, if any.
    pub fn limit(&self) -> Option<u64> {
        (self.limit > 0).then_some(u64::from(self.limit))
    }

    /// OFFSET to apply: `(page - 1) * limit` when both are set.
    pub fn offset(&self) -> Option<u64> {
        if self.limit == 0 || self.page == 0 {
            return None;
        }
        Some(u64::from(self.page - 1) * u64::from(self.limit))
    }
}

/// Sort direction for query results.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order
    #[default]
    Asc,
    /// Descending order
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

impl From<&str> for SortDirection {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "desc" | "descending" => Self::Desc,
            _ => Self::Asc,
        }
    }
}

/// Column and direction to order a listing by.
///
/// The field ends up verbatim in the query text. Check it with
/// [`SortParams::validate_against`] before handing it to a repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortParams {
    /// Column to sort by
    pub field: String,

    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortParams {
    /// Create new sort parameters.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create ascending sort parameters.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create descending sort parameters.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Reject fields outside of an allow-list.
    pub fn validate_against(&self, allowed: &[&str]) -> Result<(), String> {
        if allowed.contains(&self.field.as_str()) {
            Ok(())
        } else {
            Err(format!(
                "Cannot sort by '{}'. Must be one of: {}",
                self.field,
                allowed.join(", ")
            ))
        }
    }
}

/// Paginated result wrapper.
///
/// `total` is the number of rows matching the query before LIMIT/OFFSET, as
/// reported by the database. It can exceed `items.len()` by more than the
/// page window when rows were skipped during decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult<T> {
    /// The items for the current page
    pub items: Vec<T>,

    /// Requested page (0 when unset)
    pub page: u32,

    /// Requested limit (0 when unbounded)
    pub limit: u32,

    /// Total number of matching rows
    ///
    /// Read from the rows of the page itself, so a page past the last row
    /// reports 0 even when earlier pages hold matches.
    pub total: u64,

    /// Total number of pages
    pub total_pages: u32,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl<T> PaginatedResult<T> {
    /// Create a new paginated result.
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        let total_pages = match request.limit {
            0 if total == 0 => 0,
            0 => 1,
            limit => ((total as f64) / (limit as f64)).ceil() as u32,
        };
        let current = request.page.max(1);
        let has_next = request.limit > 0 && current < total_pages;
        let has_prev = request.limit > 0 && current > 1;

        Self {
            items,
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next,
            has_prev,
        }
    }

    /// Map the items to a different type.
    pub fn map<U, F>(self, f: F) -> PaginatedResult<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResult {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_unbounded() {
        let request = PageRequest::unbounded();
        assert_eq!(request.limit(), None);
        assert_eq!(request.offset(), None);
    }

    #[test]
    fn test_page_request_offset() {
        assert_eq!(PageRequest::new(1, 20).offset(), Some(0));
        assert_eq!(PageRequest::new(3, 20).offset(), Some(40));
        assert_eq!(PageRequest::new(3, 20).limit(), Some(20));
    }

    #[test]
    fn test_page_request_limit_without_page() {
        let request = PageRequest::new(0, 10);
        assert_eq!(request.limit(), Some(10));
        assert_eq!(request.offset(), None);
    }

    #[test]
    fn test_page_request_page_without_limit() {
        let request = PageRequest::new(4, 0);
        assert_eq!(request.limit(), None);
        assert_eq!(request.offset(), None);
    }

    #[test]
    fn test_sort_direction() {
        assert_eq!(SortDirection::from("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from("DESC"), SortDirection::Desc);
        assert_eq!(SortDirection::from("descending"), SortDirection::Desc);
        assert_eq!(SortDirection::from("invalid"), SortDirection::Asc);
        assert_eq!(SortDirection::Desc.to_string(), "DESC");
    }

    #[test]
    fn test_sort_params_allow_list() {
        let allowed = ["title", "rating"];
        assert!(SortParams::desc("rating").validate_against(&allowed).is_ok());

        let err = SortParams::asc("title; DROP TABLE books")
            .validate_against(&allowed)
            .unwrap_err();
        assert!(err.contains("title, rating"));
    }

    #[test]
    fn test_paginated_result() {
        let result = PaginatedResult::new(vec![1, 2, 3, 4, 5], PageRequest::new(2, 5), 25);

        assert_eq!(result.page, 2);
        assert_eq!(result.limit, 5);
        assert_eq!(result.total, 25);
        assert_eq!(result.total_pages, 5);
        assert!(result.has_next);
        assert!(result.has_prev);
    }

    #[test]
    fn test_paginated_result_unbounded() {
        let result = PaginatedResult::new(vec![1, 2, 3], PageRequest::unbounded(), 3);
        assert_eq!(result.total_pages, 1);
        assert!(!result.has_next);
        assert!(!result.has_prev);

        let empty: PaginatedResult<i32> = PaginatedResult::new(vec![], PageRequest::unbounded(), 0);
        assert_eq!(empty.total_pages, 0);
    }

    #[test]
    fn test_paginated_result_past_last_page() {
        let result: PaginatedResult<u32> = PaginatedResult::new(vec![], PageRequest::new(5, 2), 0);

        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages, 0);
        assert!(!result.has_next);
        assert!(result.has_prev);
    }

    #[test]
    fn test_paginated_result_map() {
        let result = PaginatedResult::new(vec![1, 2, 3], PageRequest::new(1, 3), 10);
        let mapped = result.map(|x| x * 2);

        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total, 10);
        assert_eq!(mapped.total_pages, 4);
    }

    #[test]
    fn test_page_request_deserialize_defaults() {
        let request: PageRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request, PageRequest::unbounded());
    }
}
