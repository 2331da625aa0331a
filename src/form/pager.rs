use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Page cursor for one of the form's lists. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: usize,
    current: usize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Pager {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_count(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Indexes of the entries shown on the current page.
    pub fn visible_range(&self, len: usize) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }

    /// Returns false when `page` does not exist for a list of `len` entries.
    pub fn go_to(&mut self, page: usize, len: usize) -> bool {
        if page == 0 || page > self.page_count(len) {
            return false;
        }
        self.current = page;
        true
    }

    /// Called with the new length after an append: when the new entry opened
    /// a fresh page, show that page.
    pub(crate) fn after_append(&mut self, len: usize) {
        if len > 1 && (len - 1) % self.page_size == 0 {
            self.current = self.page_count(len);
        }
    }

    pub(crate) fn after_remove(&mut self, len: usize) {
        self.current = self.current.min(self.page_count(len));
    }

    pub(crate) fn reset(&mut self) {
        self.current = 1;
    }
}
