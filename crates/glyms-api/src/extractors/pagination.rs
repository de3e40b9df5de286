//! Pagination query parameter extractor.

use serde::{Deserialize, Serialize};

use glyms_core::types::pagination::PageRequest;

/// Query parameters for paginated endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaginationParams {
    /// Page number (1-based).
    pub page: Option<u64>,
    /// Items per page (max 100).
    pub page_size: Option<u64>,
}

impl PaginationParams {
    /// Converts to a clamped `PageRequest`.
    pub fn into_page_request(self) -> PageRequest {
        let defaults = PageRequest::default();
        PageRequest::new(
            self.page.unwrap_or(defaults.page),
            self.page_size.unwrap_or(defaults.page_size),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_clamping() {
        let page = PaginationParams::default().into_page_request();
        assert_eq!((page.page, page.page_size), (1, 20));

        let page = PaginationParams {
            page: Some(0),
            page_size: Some(1000),
        }
        .into_page_request();
        assert_eq!((page.page, page.page_size), (1, 100));
    }
}
