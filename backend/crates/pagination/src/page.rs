//! A resolved page of items.

use std::num::NonZeroU64;

use serde::Serialize;

use crate::{PageRequest, PageWindow, Paginator};

/// One page of an ordered sequence together with its position metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    number: u64,
    num_pages: u64,
    count: u64,
}

impl<T> Page<T> {
    /// Wrap the items loaded for `window`.
    #[must_use]
    pub fn new(items: Vec<T>, window: PageWindow, paginator: &Paginator) -> Self {
        Self {
            items,
            number: window.number(),
            num_pages: paginator.num_pages(),
            count: paginator.count(),
        }
    }

    /// Cut the requested page out of an in-memory sequence.
    ///
    /// # Examples
    /// ```
    /// use std::num::NonZeroU64;
    ///
    /// use pagination::{Page, PageRequest};
    ///
    /// let per_page = NonZeroU64::new(10).expect("non-zero page size");
    /// let items: Vec<u32> = (1..=13).collect();
    /// let second = Page::from_sequence(items, per_page, PageRequest::new(2));
    /// assert_eq!(second.items(), &[11, 12, 13]);
    /// ```
    #[must_use]
    pub fn from_sequence(items: Vec<T>, per_page: NonZeroU64, request: PageRequest) -> Self {
        let count = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let paginator = Paginator::new(per_page, count);
        let window = paginator.window(request);
        let skip = usize::try_from(window.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(window.limit()).unwrap_or(usize::MAX);
        let page_items = items.into_iter().skip(skip).take(take).collect();
        Self::new(page_items, window, &paginator)
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-based number of this page.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Total number of pages.
    #[must_use]
    pub const fn num_pages(&self) -> u64 {
        self.num_pages
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Number of the next page, if any.
    #[must_use]
    pub const fn next_page_number(&self) -> Option<u64> {
        if self.has_next() {
            Some(self.number + 1)
        } else {
            None
        }
    }

    /// Number of the previous page, if any.
    #[must_use]
    pub const fn previous_page_number(&self) -> Option<u64> {
        if self.has_previous() {
            Some(self.number - 1)
        } else {
            None
        }
    }

    /// Transform the items while keeping the page position.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            count: self.count,
        }
    }
}
