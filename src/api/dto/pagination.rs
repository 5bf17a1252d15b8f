//! Pagination-related DTOs for API requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::repositories::SortDirection;

/// Query parameters for paginated listing.
///
/// `linesPerPage` and `orderBy` are accepted as aliases so clients of the
/// older query-string dialect keep working.
#[derive(Debug, Deserialize, IntoParams, Validate)]
pub struct PageQuery {
    /// Page index (0-based)
    #[serde(default)]
    #[param(minimum = 0, example = 0)]
    pub page: u32,

    /// Number of items per page. Oversized values are passed through to the
    /// store as-is; the service imposes no upper bound.
    #[serde(default = "default_page_size", alias = "linesPerPage")]
    #[validate(range(min = 1, message = "Page size must be positive"))]
    #[param(minimum = 1, example = 12)]
    pub size: u32,

    /// Column to sort by (per-entity whitelist, `id` by default)
    #[serde(default = "default_order_by", alias = "orderBy")]
    pub order_by: String,

    /// Sort direction
    #[serde(default)]
    #[param(inline)]
    pub direction: Direction,
}

impl PageQuery {
    /// Offset for the database query.
    pub fn offset(&self) -> i64 {
        i64::from(self.page) * i64::from(self.size)
    }

    /// Limit for the database query.
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

fn default_page_size() -> u32 {
    12
}

fn default_order_by() -> String {
    "id".to_string()
}

/// Sort direction as it appears on the wire.
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl From<Direction> for SortDirection {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Asc => SortDirection::Asc,
            Direction::Desc => SortDirection::Desc,
        }
    }
}

/// Generic paged response wrapper.
#[derive(Debug, Serialize, ToSchema)]
pub struct PagedResponse<T> {
    /// The data items for this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationMeta,
}

/// Pagination metadata.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    /// Current page index (0-based)
    #[schema(example = 0)]
    pub page: u32,

    /// Number of items per page
    #[schema(example = 12)]
    pub size: u32,

    /// Total number of items across all pages
    #[schema(example = 25)]
    pub total_items: u64,

    /// Total number of pages
    #[schema(example = 3)]
    pub total_pages: u32,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl<T> PagedResponse<T> {
    /// Creates a new paged response from a slice and the unfiltered count.
    pub fn new(data: Vec<T>, query: &PageQuery, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(u64::from(query.size)) as u32;
        let has_next = query.page + 1 < total_pages;
        let has_prev = query.page > 0;

        Self {
            data,
            pagination: PaginationMeta {
                page: query.page,
                size: query.size,
                total_items,
                total_pages,
                has_next,
                has_prev,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: u32, size: u32) -> PageQuery {
        PageQuery {
            page,
            size,
            order_by: default_order_by(),
            direction: Direction::Asc,
        }
    }

    #[test]
    fn test_offset_and_limit() {
        let q = query(2, 12);
        assert_eq!(q.offset(), 24);
        assert_eq!(q.limit(), 12);
    }

    #[test]
    fn test_first_page_metadata() {
        let response = PagedResponse::new(vec![1, 2, 3], &query(0, 3), 25);
        let meta = &response.pagination;
        assert_eq!(meta.total_pages, 9);
        assert_eq!(meta.total_items, 25);
        assert!(meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn test_last_page_metadata() {
        let response = PagedResponse::new(vec![25], &query(8, 3), 25);
        let meta = &response.pagination;
        assert!(!meta.has_next);
        assert!(meta.has_prev);
    }

    #[test]
    fn test_empty_dataset_has_no_pages() {
        let response = PagedResponse::<i32>::new(vec![], &query(0, 12), 0);
        let meta = &response.pagination;
        assert_eq!(meta.total_pages, 0);
        assert!(!meta.has_next);
        assert!(!meta.has_prev);
    }

    #[test]
    fn test_query_string_aliases() {
        let q: PageQuery =
            serde_urlencoded_probe("page=1&linesPerPage=5&orderBy=name&direction=desc");
        assert_eq!(q.page, 1);
        assert_eq!(q.size, 5);
        assert_eq!(q.order_by, "name");
        assert!(matches!(q.direction, Direction::Desc));
    }

    #[test]
    fn test_query_string_defaults() {
        let q: PageQuery = serde_urlencoded_probe("");
        assert_eq!(q.page, 0);
        assert_eq!(q.size, 12);
        assert_eq!(q.order_by, "id");
        assert!(matches!(q.direction, Direction::Asc));
    }

    fn serde_urlencoded_probe(query_string: &str) -> PageQuery {
        // serde_json round-trips through a map to exercise the same serde
        // attributes the Query extractor uses
        let mut map = serde_json::Map::new();
        for pair in query_string.split('&').filter(|s| !s.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap();
            let json_value = value
                .parse::<u64>()
                .map(serde_json::Value::from)
                .unwrap_or_else(|_| serde_json::Value::from(value));
            map.insert(key.to_string(), json_value);
        }
        serde_json::from_value(serde_json::Value::Object(map)).unwrap()
    }
}
