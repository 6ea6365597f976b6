//! Pagination for `GET /employees`
//!
//! Offset/limit paging with a hard page size cap.

use serde::Deserialize;

/// Maximum (and default) number of rows per page
pub const PAGE_SIZE: i64 = 100;

/// Raw query parameters; missing values take the defaults
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Sanitized window for SQL `LIMIT`/`OFFSET`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub offset: i64,
    pub limit: i64,
}

impl PageQuery {
    /// Negative values clamp to 0 and `limit` never exceeds [`PAGE_SIZE`]
    pub fn page(&self) -> Page {
        Page {
            offset: self.skip.unwrap_or(0).max(0),
            limit: self.limit.unwrap_or(PAGE_SIZE).clamp(0, PAGE_SIZE),
        }
    }
}
