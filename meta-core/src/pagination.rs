//! Page-following bookkeeping.
//!
//! [`PageAccumulator`] knows which URL to request next and collects items in
//! arrival order. It performs no I/O; the client's paginator drives it.

use storemeta_types::Page;

/// Accumulates the pages of one collection.
#[derive(Debug, Clone)]
pub struct PageAccumulator<T> {
    items: Vec<T>,
    next: Option<String>,
    pages: usize,
}

impl<T> PageAccumulator<T> {
    /// Start at the first page's URL.
    pub fn new(first_url: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            next: Some(first_url.into()),
            pages: 0,
        }
    }

    /// URL to request next, `None` once the last page has been seen.
    pub fn next_url(&self) -> Option<&str> {
        self.next.as_deref()
    }

    /// Append a page. Items keep server order; nothing is deduplicated.
    pub fn push(&mut self, page: Page<T>) {
        self.pages += 1;
        self.items.extend(page.items);
        self.next = page.next;
    }

    /// Whether the last page has been received.
    pub fn is_complete(&self) -> bool {
        self.next.is_none()
    }

    /// Number of pages received so far.
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Items collected so far.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The first item of the first page: the primary record when nothing
    /// better designates one.
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    /// Consume and return every collected item.
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}
