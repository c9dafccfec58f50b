//! Skip/take paging types for list endpoints.

use serde::Serialize;
use utoipa::ToSchema;

use crate::config::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, MAX_SKIP_COUNT};
use crate::domain::ClientRow;

/// Window into a result set, expressed as rows to skip and rows to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub skip_count: u64,
    pub max_result_count: u64,
}

impl PageRequest {
    pub fn new(skip_count: u64, max_result_count: u64) -> Self {
        Self {
            skip_count,
            max_result_count,
        }
    }

    /// Offset for the database query, clamped to what the drivers bind
    pub fn offset(&self) -> u64 {
        self.skip_count.min(MAX_SKIP_COUNT)
    }

    /// Limit capped at maximum
    pub fn limit(&self) -> u64 {
        self.max_result_count.min(MAX_PAGE_SIZE)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            skip_count: 0,
            max_result_count: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of rows plus the number of rows matching before paging.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[aliases(PagedClientRows = PagedResult<ClientRow>)]
pub struct PagedResult<T> {
    pub total_count: u64,
    pub items: Vec<T>,
}

impl<T> PagedResult<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { total_count, items }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limit_is_capped() {
        assert_eq!(PageRequest::new(0, 10_000).limit(), MAX_PAGE_SIZE);
        assert_eq!(PageRequest::new(0, 5).limit(), 5);
    }

    #[test]
    fn offset_fits_signed_bind() {
        assert_eq!(PageRequest::new(u64::MAX, 10).offset(), i64::MAX as u64);
        assert_eq!(PageRequest::new(40, 10).offset(), 40);
    }

    #[test]
    fn defaults_start_at_first_row() {
        let page = PageRequest::default();
        assert_eq!(page.offset(), 0);
        assert_eq!(page.limit(), DEFAULT_PAGE_SIZE);
    }
}
