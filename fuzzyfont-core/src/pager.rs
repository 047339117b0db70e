//! Page arithmetic for the interactive listing.

/// Default rows per page in the interactive listing.
pub const DEFAULT_PAGE_SIZE: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page: usize,
    page_size: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    /// A zero page size is bumped to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 0,
            page_size: page_size.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `len` items; an empty list still has one page.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Offset of the first row on the current page.
    pub fn start(&self) -> usize {
        self.page * self.page_size
    }

    /// Advance one page. Returns false, leaving the page unchanged, at the last page.
    pub fn next(&mut self, len: usize) -> bool {
        if self.page + 1 < self.total_pages(len) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page. Returns false at the first page.
    pub fn prev(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.page = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_items_over_two_pages() {
        let mut pager = Pager::new(16);

        assert_eq!(pager.total_pages(20), 2);
        assert_eq!(pager.start(), 0);
        assert!(pager.next(20));
        assert_eq!(pager.start() + 1, 17);
        assert!(!pager.next(20));
        assert_eq!(pager.page(), 1);
    }

    #[test]
    fn empty_list_has_one_page() {
        let mut pager = Pager::default();
        assert_eq!(pager.total_pages(0), 1);
        assert_eq!(pager.start(), 0);
        assert!(!pager.next(0));
        assert!(!pager.prev());
    }

    #[test]
    fn exact_multiple_does_not_add_a_page() {
        let pager = Pager::new(4);
        assert_eq!(pager.total_pages(8), 2);
        assert_eq!(pager.total_pages(9), 3);
    }

    #[test]
    fn zero_page_size_is_clamped() {
        assert_eq!(Pager::new(0).page_size(), 1);
    }
}
