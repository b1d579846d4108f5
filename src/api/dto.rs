//! Shared Data Transfer Objects (DTOs) for API handlers.

use serde::Serialize;
use utoipa::ToSchema;

/// Pagination metadata for list responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: u32,
    /// Number of items per page
    pub per_page: u32,
    /// Total number of items across all pages
    pub total: i64,
    /// Total number of pages
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(page: u32, per_page: u32, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            ((total as f64) / (per_page as f64)).ceil() as u32
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_rounds_up_partial_pages() {
        let p = Pagination::new(1, 20, 55);
        assert_eq!(p.total_pages, 3);
    }

    #[test]
    fn test_pagination_empty_result_has_zero_pages() {
        let p = Pagination::new(1, 20, 0);
        assert_eq!(p.total_pages, 0);
    }

    #[test]
    fn test_pagination_exact_multiple() {
        let p = Pagination::new(2, 10, 40);
        assert_eq!(p.total_pages, 4);
        assert_eq!(p.page, 2);
    }
}
