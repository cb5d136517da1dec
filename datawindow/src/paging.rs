use alloc::vec::Vec;

use crate::{ConfigError, Page};

/// Fixed-size pagination over an immutable snapshot.
///
/// Page numbers are 1-based. An empty snapshot still has one (empty) page, so the current page
/// pointer is always valid.
#[derive(Clone, Debug)]
pub struct PagedView<T> {
    data: Vec<T>,
    page_size: usize,
    total_pages: usize,
    current_page: usize,
}

impl<T> PagedView<T> {
    pub fn new(data: Vec<T>, page_size: usize) -> Result<Self, ConfigError> {
        if page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        let total_pages = total_pages_for(data.len(), page_size);
        Ok(Self {
            data,
            page_size,
            total_pages,
            current_page: 1,
        })
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        self.total_pages
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    /// Returns page `page`, clamped into `[1, total_pages]`, and makes it the current page.
    pub fn get_page_data(&mut self, page: usize) -> Page<'_, T> {
        self.current_page = self.clamp_page(page);
        self.page(self.current_page)
    }

    pub fn current_page_data(&self) -> Page<'_, T> {
        self.page(self.current_page)
    }

    /// Advances to the next page; stays on the last page.
    pub fn next_page(&mut self) -> Page<'_, T> {
        self.get_page_data(self.current_page.saturating_add(1))
    }

    /// Steps back one page; stays on the first page.
    pub fn prev_page(&mut self) -> Page<'_, T> {
        self.get_page_data(self.current_page.saturating_sub(1))
    }

    /// Iterates every page in order without touching the current page pointer.
    pub fn pages(&self) -> impl Iterator<Item = Page<'_, T>> + '_ {
        (1..=self.total_pages).map(move |n| self.page(n))
    }

    /// Replaces the snapshot and pulls the current page back into the new valid range.
    pub fn update_data(&mut self, data: Vec<T>) {
        self.data = data;
        self.total_pages = total_pages_for(self.data.len(), self.page_size);
        self.current_page = self.clamp_page(self.current_page);
        vdebug!(
            len = self.data.len(),
            total_pages = self.total_pages,
            current_page = self.current_page,
            "PagedView::update_data"
        );
    }

    fn clamp_page(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages)
    }

    fn page(&self, page: usize) -> Page<'_, T> {
        let start = (page - 1).saturating_mul(self.page_size).min(self.data.len());
        let end = start.saturating_add(self.page_size).min(self.data.len());
        Page {
            items: &self.data[start..end],
            index: page,
            size: self.page_size,
        }
    }
}

fn total_pages_for(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size).max(1)
}
