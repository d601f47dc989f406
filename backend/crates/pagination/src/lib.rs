//! Page-number pagination primitives shared by admin console listings.
//!
//! Listings are addressed by a one-based page number and a non-zero page
//! size. A [`PageCursor`] turns those two values into a slice window over an
//! already filtered collection, and [`Page`] is the envelope returned to
//! callers together with the counts a pager needs.
//!
//! Page numbers are deliberately not clamped: asking for a page past the end
//! (or for page `0`) yields an empty window rather than an error.
//!
//! # Example
//!
//! ```
//! use pagination::{PageCursor, PageSize};
//!
//! let size = PageSize::new(2).expect("non-zero page size");
//! let cursor = PageCursor::new(2, size);
//! let items = [1, 2, 3, 4, 5];
//!
//! assert_eq!(cursor.slice(&items), &[3, 4]);
//! assert_eq!(cursor.total_pages(items.len()), 3);
//! ```

use std::fmt;
use std::num::NonZeroUsize;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when callers do not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Errors raised while constructing pagination values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageSizeError {
    /// Page sizes must hold at least one item.
    #[error("page size must be greater than zero")]
    Zero,
}

/// Number of items shown per page.
///
/// ## Invariants
/// - Always greater than zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    /// Validate and construct a page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageSizeError::Zero`] when `size` is zero.
    pub fn new(size: usize) -> Result<Self, PageSizeError> {
        NonZeroUsize::new(size).map(Self).ok_or(PageSizeError::Zero)
    }

    /// Raw number of items per page.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = PageSizeError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PageSize> for usize {
    fn from(value: PageSize) -> Self {
        value.get()
    }
}

/// Current position in a paged listing.
///
/// `current_page` is one-based and is not bounds checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageCursor {
    current_page: usize,
    page_size: PageSize,
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::first(PageSize::default())
    }
}

impl PageCursor {
    /// Build a cursor for an arbitrary page.
    #[must_use]
    pub const fn new(current_page: usize, page_size: PageSize) -> Self {
        Self {
            current_page,
            page_size,
        }
    }

    /// Build a cursor positioned on the first page.
    #[must_use]
    pub const fn first(page_size: PageSize) -> Self {
        Self::new(1, page_size)
    }

    /// One-based page number.
    #[must_use]
    pub const fn current_page(&self) -> usize {
        self.current_page
    }

    /// Items per page.
    #[must_use]
    pub const fn page_size(&self) -> PageSize {
        self.page_size
    }

    /// Move to `page` without bounds checking.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page;
    }

    /// Replace the page size and rewind to the first page.
    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.current_page = 1;
    }

    /// Rewind to the first page, keeping the page size.
    pub fn rewind(&mut self) {
        self.current_page = 1;
    }

    /// Index window `[size * (page - 1), size * page)` clipped to `len`.
    ///
    /// Pages before the first or after the last produce an empty range.
    #[must_use]
    pub fn window(&self, len: usize) -> Range<usize> {
        let size = self.page_size.get();
        let Some(start) = self
            .current_page
            .checked_sub(1)
            .and_then(|index| index.checked_mul(size))
        else {
            return 0..0;
        };
        if start >= len {
            return 0..0;
        }
        start..start.saturating_add(size).min(len)
    }

    /// Borrow the items that fall on the current page.
    #[must_use]
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        items.get(self.window(items.len())).unwrap_or_default()
    }

    /// Number of pages needed to show `total` items.
    #[must_use]
    pub const fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size.get())
    }
}

/// One page of results together with pager metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items on the current page.
    pub items: Vec<T>,
    /// One-based page number the items were taken from.
    pub current_page: usize,
    /// Items per page.
    pub page_size: PageSize,
    /// Number of items across every page.
    pub total: usize,
    /// Number of pages needed to show `total` items.
    pub total_pages: usize,
}

impl<T: Clone> Page<T> {
    /// Cut the current page out of `items` according to `cursor`.
    #[must_use]
    pub fn from_slice(items: &[T], cursor: &PageCursor) -> Self {
        Self {
            items: cursor.slice(items).to_vec(),
            current_page: cursor.current_page(),
            page_size: cursor.page_size(),
            total: items.len(),
            total_pages: cursor.total_pages(items.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Window arithmetic coverage.

    use rstest::rstest;

    use super::*;

    fn cursor(page: usize, size: usize) -> PageCursor {
        PageCursor::new(page, PageSize::new(size).unwrap_or_default())
    }

    #[rstest]
    #[case::first_page(1, 2, 5, 0..2)]
    #[case::middle_page(2, 2, 5, 2..4)]
    #[case::partial_last_page(3, 2, 5, 4..5)]
    #[case::past_the_end(4, 2, 5, 0..0)]
    #[case::page_zero(0, 2, 5, 0..0)]
    #[case::empty_collection(1, 10, 0, 0..0)]
    #[case::overflowing_page(usize::MAX, 10, 5, 0..0)]
    fn window_follows_one_based_pages(
        #[case] page: usize,
        #[case] size: usize,
        #[case] len: usize,
        #[case] expected: Range<usize>,
    ) {
        assert_eq!(cursor(page, size).window(len), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(10, 1)]
    #[case(11, 2)]
    fn total_pages_rounds_up(#[case] total: usize, #[case] expected: usize) {
        assert_eq!(cursor(1, 10).total_pages(total), expected);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert_eq!(PageSize::new(0), Err(PageSizeError::Zero));
    }

    #[test]
    fn set_page_size_rewinds() {
        let mut value = cursor(3, 5);
        value.set_page_size(PageSize::new(20).unwrap_or_default());
        assert_eq!(value.current_page(), 1);
        assert_eq!(value.page_size().get(), 20);
    }

    #[test]
    fn default_cursor_starts_on_first_page_of_ten() {
        let value = PageCursor::default();
        assert_eq!(value.current_page(), 1);
        assert_eq!(value.page_size().get(), DEFAULT_PAGE_SIZE);
    }
}
