/// Default 1-based page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// A 1-based page request.
///
/// Callers supply positive numbers; a zero page is treated as the first page rather than
/// underflowing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub page_size: u32,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageQuery {
    pub const fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }

    /// Number of items preceding this page.
    pub const fn skip(&self) -> u64 {
        self.page.saturating_sub(1) as u64 * self.page_size as u64
    }

    /// Maximum number of items on this page.
    pub const fn limit(&self) -> u64 {
        self.page_size as u64
    }

    /// Selects this page out of an already ordered sequence.
    pub fn slice<I: IntoIterator>(&self, items: I) -> impl Iterator<Item = I::Item> {
        items
            .into_iter()
            .skip(usize::try_from(self.skip()).unwrap_or(usize::MAX))
            .take(usize::try_from(self.limit()).unwrap_or(usize::MAX))
    }
}
