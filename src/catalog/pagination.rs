//! Pagination state for the listing endpoint.

/// Fixed number of records per listing page.
pub const PAGE_SIZE: u32 = 20;

/// Number of pages needed for `count` records at [`PAGE_SIZE`] per page.
///
/// # Examples
///
/// ```
/// use dexview::catalog::pagination::total_pages_for;
///
/// assert_eq!(total_pages_for(1302), 66);
/// assert_eq!(total_pages_for(0), 0);
/// ```
#[must_use]
pub const fn total_pages_for(count: u32) -> u32 {
    count.div_ceil(PAGE_SIZE)
}

/// Listing offset of a 1-based page.
#[must_use]
pub const fn offset_for(page: u32) -> u32 {
    page.saturating_sub(1).saturating_mul(PAGE_SIZE)
}

/// Current page and known page count.
///
/// `total_pages` is `0` until the first listing arrives. Once it is known,
/// `current` stays within `1..=total_pages`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current: 1,
            total_pages: 0,
        }
    }
}

impl Pagination {
    /// Whether the page count has been reported by the service yet.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.total_pages > 0
    }

    /// Page after `from`, or `None` at the last page or while the count is unknown.
    #[must_use]
    pub const fn next_after(&self, from: u32) -> Option<u32> {
        if self.is_known() && from < self.total_pages {
            Some(from + 1)
        } else {
            None
        }
    }

    /// Page before `from`, or `None` at page 1.
    #[must_use]
    pub const fn prev_before(&self, from: u32) -> Option<u32> {
        if from > 1 {
            Some(from - 1)
        } else {
            None
        }
    }

    /// Whether `page` is a valid navigation target.
    ///
    /// Before the count is known only page 1 is accepted.
    #[must_use]
    pub const fn contains(&self, page: u32) -> bool {
        if self.is_known() {
            page >= 1 && page <= self.total_pages
        } else {
            page == 1
        }
    }

    /// Records a fresh page count from the service and clamps `current` into range.
    pub fn set_total_from_count(&mut self, count: u32) {
        self.total_pages = total_pages_for(count);
        if self.is_known() && self.current > self.total_pages {
            self.current = self.total_pages;
        }
    }
}
