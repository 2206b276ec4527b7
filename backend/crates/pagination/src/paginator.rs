//! Resolution of requested pages against a known item count.

use std::num::NonZeroU64;

use crate::PageRequest;

/// Splits `count` items into pages of `per_page` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: NonZeroU64,
    count: u64,
}

impl Paginator {
    /// Build a paginator over `count` items.
    #[must_use]
    pub const fn new(per_page: NonZeroU64, count: u64) -> Self {
        Self { per_page, count }
    }

    /// Total number of items across all pages.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Maximum number of items on a page.
    #[must_use]
    pub const fn per_page(&self) -> NonZeroU64 {
        self.per_page
    }

    /// Number of pages; never zero.
    #[must_use]
    pub const fn num_pages(&self) -> u64 {
        if self.count == 0 {
            1
        } else {
            self.count.div_ceil(self.per_page.get())
        }
    }

    /// Resolve a requested page, clamping it into `1..=num_pages`.
    #[must_use]
    pub fn window(&self, request: PageRequest) -> PageWindow {
        let last = self.num_pages();
        let number = match u64::try_from(request.number()) {
            Ok(0) | Err(_) => 1,
            Ok(number) => number.min(last),
        };
        let per_page = self.per_page.get();
        PageWindow {
            number,
            offset: (number - 1).saturating_mul(per_page),
            limit: per_page,
        }
    }
}

/// The slice of a sequence that makes up one resolved page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    number: u64,
    offset: u64,
    limit: u64,
}

impl PageWindow {
    /// The resolved 1-based page number.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }
}
