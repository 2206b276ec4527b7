//! Page-number pagination primitives shared by feed endpoints.
//!
//! Feeds are paginated with 1-based page numbers over a fixed page size. A
//! client supplies a [`PageRequest`] (parsed leniently from a query string),
//! a [`Paginator`] resolves it against the total item count into a
//! [`PageWindow`], and the caller loads that window and wraps the items in a
//! [`Page`].
//!
//! Out-of-range requests never fail: a number below one resolves to the first
//! page and a number past the end resolves to the last page. An empty
//! sequence still has exactly one (empty) page.
//!
//! # Examples
//! ```
//! use std::num::NonZeroU64;
//!
//! use pagination::{Page, PageRequest, Paginator};
//!
//! let per_page = NonZeroU64::new(10).expect("non-zero page size");
//! let paginator = Paginator::new(per_page, 13);
//! let window = paginator.window(PageRequest::from_query(Some("2")));
//! assert_eq!(window.offset(), 10);
//!
//! let page = Page::new(vec![11, 12, 13], window, &paginator);
//! assert_eq!(page.number(), 2);
//! assert!(!page.has_next());
//! assert!(page.has_previous());
//! ```

mod page;
mod paginator;
mod request;

pub use page::Page;
pub use paginator::{PageWindow, Paginator};
pub use request::{PageNumberError, PageRequest};
