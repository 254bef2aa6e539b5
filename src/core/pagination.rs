//! Paginator

use std::ops::Range;

/// Page size used when a request asks for a page without saying how big
pub const DEFAULT_ITEMS_PER_PAGE: usize = 10;

/// A 1-based page window
///
/// Both numbers are clamped to at least 1 on construction, so a malformed
/// request can never produce an invalid window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationQuery {
    page: usize,
    items_per_page: usize,
}

impl PaginationQuery {
    /// Create a page window, clamping non-positive values to 1
    pub fn new(page: i64, items_per_page: i64) -> Self {
        Self {
            page: clamp_to_usize(page),
            items_per_page: clamp_to_usize(items_per_page),
        }
    }

    /// Page number (starts at 1)
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of items per page
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Index range of this page within a sequence of `len` items
    ///
    /// A page starting past the end gives an empty range.
    pub fn window(&self, len: usize) -> Range<usize> {
        let start = (self.page - 1).saturating_mul(self.items_per_page);
        let end = self.page.saturating_mul(self.items_per_page);
        start.min(len)..end.min(len)
    }

    /// Number of pages needed to show `total` items
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.items_per_page)
    }

    /// Keep only the cells on this page
    pub fn apply<C>(&self, cells: Vec<C>) -> Vec<C> {
        let window = self.window(cells.len());
        cells
            .into_iter()
            .skip(window.start)
            .take(window.len())
            .collect()
    }
}

impl Default for PaginationQuery {
    fn default() -> Self {
        Self {
            page: 1,
            items_per_page: DEFAULT_ITEMS_PER_PAGE,
        }
    }
}

fn clamp_to_usize(value: i64) -> usize {
    usize::try_from(value.max(1)).unwrap_or(usize::MAX)
}
