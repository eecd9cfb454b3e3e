use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::constants::MAX_PAGE_SIZE;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub meta: Option<Meta>,
    pub errors: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Meta {
    pub total: i64,
}

// =============================================================================
// PAGINATION
// =============================================================================

/// Resolved page window for a paginated list endpoint.
///
/// Each endpoint has its own default page size; all share `MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub limit: i64,
}

impl PageWindow {
    pub fn resolve(page: Option<i64>, page_size: Option<i64>, default_size: i64) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            limit: page_size.unwrap_or(default_size).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// SQL OFFSET for this page
    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl<T> ApiResponse<T> {
    pub fn success(data: Option<T>, message: Option<String>, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            data,
            message,
            meta,
            errors: None,
        }
    }

    pub fn error(message: Option<String>, errors: Option<Vec<String>>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            message,
            meta: None,
            errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_defaults() {
        let window = PageWindow::resolve(None, None, 100);
        assert_eq!(window, PageWindow { page: 1, limit: 100 });
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_page_window_clamps() {
        let window = PageWindow::resolve(Some(0), Some(5000), 100);
        assert_eq!(window.page, 1);
        assert_eq!(window.limit, MAX_PAGE_SIZE);

        let window = PageWindow::resolve(Some(3), Some(0), 100);
        assert_eq!(window.limit, 1);
        assert_eq!(window.offset(), 2);
    }

    #[test]
    fn test_page_window_offset() {
        let window = PageWindow::resolve(Some(4), Some(25), 100);
        assert_eq!(window.offset(), 75);
    }

    #[test]
    fn test_error_envelope_shape() {
        let body = serde_json::to_value(ApiResponse::<()>::error(
            Some("nope".to_string()),
            None,
        ))
        .unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "nope");
        assert!(body["data"].is_null());
    }
}
