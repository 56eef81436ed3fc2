//! Pagination stage.

use std::ops::Range;

use serde::Deserialize;
use serde::Serialize;

/// Number of pages needed for `total` rows. Always at least one.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1)).max(1)
}

/// Current page window of a table.
///
/// Pages are 1-based. The page size is never zero and the current page is
/// kept within `[1, total_pages]` by every method that knows the row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page_size: usize,
    current_page: usize,
}

impl PageState {
    /// First page with the given size (clamped to at least 1).
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current_page: 1,
        }
    }

    /// Rows per page.
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Current 1-based page.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Number of pages for `total` rows.
    pub fn total_pages(&self, total: usize) -> usize {
        total_pages(total, self.page_size)
    }

    /// Move to `page`, clamped into `[1, total_pages]`. Returns the page
    /// actually selected.
    pub fn set_page(&mut self, page: usize, total: usize) -> usize {
        self.current_page = page.clamp(1, self.total_pages(total));
        self.current_page
    }

    /// Change the page size and return to the first page.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.current_page = 1;
    }

    /// Return to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Re-clamp the current page after the row count changed.
    pub fn clamp(&mut self, total: usize) -> usize {
        self.set_page(self.current_page, total)
    }

    /// Slice bounds of the current page within `total` rows.
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = (self.current_page - 1)
            .saturating_mul(self.page_size)
            .min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    /// 1-based position of the first row on the page, or 0 when empty.
    pub fn from_index(&self, total: usize) -> usize {
        if total == 0 {
            0
        } else {
            (self.current_page - 1) * self.page_size + 1
        }
    }

    /// 1-based position of the last row on the page.
    pub fn to_index(&self, total: usize) -> usize {
        (self.current_page * self.page_size).min(total)
    }

    /// The page/page-size pair reported to hosts.
    pub fn change(&self) -> PageChange {
        PageChange {
            page: self.current_page,
            page_size: self.page_size,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(super::config::DEFAULT_PAGE_SIZE)
    }
}

/// Payload of a page change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageChange {
    /// 1-based page.
    pub page: usize,
    /// Rows per page.
    pub page_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_minimum_one() {
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn test_set_page_clamps() {
        let mut page = PageState::new(2);
        assert_eq!(page.set_page(0, 5), 1);
        assert_eq!(page.set_page(99, 5), 3);
        assert_eq!(page.set_page(2, 5), 2);
    }

    #[test]
    fn test_range_clips_to_total() {
        let mut page = PageState::new(2);
        page.set_page(3, 5);
        assert_eq!(page.range(5), 4..5);
        assert_eq!(page.from_index(5), 5);
        assert_eq!(page.to_index(5), 5);
    }

    #[test]
    fn test_empty_range() {
        let page = PageState::new(10);
        assert_eq!(page.range(0), 0..0);
        assert_eq!(page.from_index(0), 0);
        assert_eq!(page.to_index(0), 0);
    }

    #[test]
    fn test_page_size_change_resets_page() {
        let mut page = PageState::new(2);
        page.set_page(3, 10);
        page.set_page_size(0);
        assert_eq!(page.page_size(), 1);
        assert_eq!(page.current_page(), 1);
    }

    #[test]
    fn test_page_change_serializes_camel_case() {
        let json = serde_json::to_string(&PageState::new(20).change()).unwrap();
        assert_eq!(json, r#"{"page":1,"pageSize":20}"#);
    }
}
