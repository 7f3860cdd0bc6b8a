//! Zero-based pagination primitives.

/// Page size used when the client does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Largest page size a client may request.
pub const MAX_PAGE_SIZE: u32 = 2000;

/// A window over an ordered result set: zero-based page number and size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self { page, size }
    }

    /// Number of records to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }

    /// Maximum number of records to return.
    pub fn limit(&self) -> u32 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(0, DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the total number of matches across all pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
        }
    }

    /// Converts every item while keeping the paging metadata.
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
        }
    }

    /// Total number of pages; a zero page size counts as a single page.
    pub fn total_pages(&self) -> u64 {
        if self.request.size == 0 {
            1
        } else {
            self.total.div_ceil(u64::from(self.request.size))
        }
    }

    pub fn is_first(&self) -> bool {
        self.request.page == 0
    }

    pub fn is_last(&self) -> bool {
        u64::from(self.request.page) + 1 >= self.total_pages()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_default_request() {
        let request = PageRequest::default();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_offset_and_limit() {
        let request = PageRequest::new(3, 25);
        assert_eq!(request.offset(), 75);
        assert_eq!(request.limit(), 25);
    }

    #[test]
    fn test_total_pages_rounds_up() {
        let page: Page<u8> = Page::new(vec![], 41, PageRequest::new(0, 20));
        assert_eq!(page.total_pages(), 3);

        let exact: Page<u8> = Page::new(vec![], 40, PageRequest::new(0, 20));
        assert_eq!(exact.total_pages(), 2);

        let none: Page<u8> = Page::new(Vec::new(), 0, PageRequest::default());
        assert_eq!(none.total_pages(), 0);
        assert!(none.is_first());
        assert!(none.is_last());
    }

    #[test]
    fn test_first_and_last() {
        let middle: Page<u8> = Page::new(vec![1], 100, PageRequest::new(1, 20));
        assert!(!middle.is_first());
        assert!(!middle.is_last());

        let tail: Page<u8> = Page::new(vec![1], 100, PageRequest::new(4, 20));
        assert!(tail.is_last());
    }

    #[test]
    fn test_map_keeps_metadata() {
        let page = Page::new(vec![1, 2], 12, PageRequest::new(1, 2)).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.total, 12);
        assert_eq!(page.request, PageRequest::new(1, 2));
    }

    proptest! {
        #[test]
        fn prop_total_pages_covers_total(total in 0u64..100_000, size in 1u32..2001) {
            let page: Page<u8> = Page::new(vec![], total, PageRequest::new(0, size));
            let pages = page.total_pages();
            prop_assert!(pages * u64::from(size) >= total);
            prop_assert!(pages == 0 || (pages - 1) * u64::from(size) < total);
        }
    }
}
