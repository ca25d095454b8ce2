//! Offset pagination over in-memory result sets.

/// A requested page. Both values are 1-based and at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u32 = 1;
    pub const DEFAULT_LIMIT: u32 = 10;

    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(Self::DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(Self::DEFAULT_LIMIT).max(1),
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page.saturating_sub(1) as usize).saturating_mul(self.limit as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus the numbers needed to navigate.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: usize,
    pub total_pages: usize,
}

/// Slice `[offset, offset + limit)` out of `items`.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let limit = request.limit.max(1) as usize;
    let items = items
        .into_iter()
        .skip(request.offset())
        .take(limit)
        .collect();

    Page {
        items,
        page: request.page,
        limit: request.limit,
        total,
        total_pages: total.div_ceil(limit),
    }
}
