//! Page/limit pagination primitives shared by list endpoints.
//!
//! Requests are expressed as a one-based page number and a page size. The
//! resulting [`PageMeta`] reports the total number of items and the number of
//! pages so clients can render navigation without a second round trip.
//!
//! # Examples
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(2, 10).expect("valid page request");
//! assert_eq!(request.offset(), 10);
//!
//! let page = Page::new(vec!["a", "b"], request, 12);
//! assert_eq!(page.meta().pages, 2);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page number used when the client does not supply one.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the client does not supply one.
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest page size a client may request.
pub const MAX_LIMIT: u64 = 100;

/// Validation failures raised while building a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Page numbers are one-based.
    #[error("page must be at least 1")]
    PageTooSmall,
    /// A page must hold at least one item.
    #[error("limit must be at least 1")]
    LimitTooSmall,
    /// The page size exceeds [`MAX_LIMIT`].
    #[error("limit must be at most {max}")]
    LimitTooLarge {
        /// Largest accepted page size.
        max: u64,
    },
}

/// Validated one-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError`] when `page` or `limit` is zero, or when
    /// `limit` exceeds [`MAX_LIMIT`].
    pub const fn new(page: u64, limit: u64) -> Result<Self, PaginationError> {
        if page < 1 {
            return Err(PaginationError::PageTooSmall);
        }
        if limit < 1 {
            return Err(PaginationError::LimitTooSmall);
        }
        if limit > MAX_LIMIT {
            return Err(PaginationError::LimitTooLarge { max: MAX_LIMIT });
        }
        Ok(Self { page, limit })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of items on the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of items to skip before this page starts.
    ///
    /// Saturates at `u64::MAX`, which always yields an empty page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        match (self.page - 1).checked_mul(self.limit) {
            Some(offset) => offset,
            None => u64::MAX,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Pagination metadata returned alongside a page of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// One-based page number that was served.
    pub page: u64,
    /// Requested page size.
    pub limit: u64,
    /// Size of the whole, unfiltered collection.
    pub total: u64,
    /// Number of pages needed to cover `total` at `limit` items per page.
    pub pages: u64,
}

impl PageMeta {
    /// Build metadata for `request` over a collection of `total` items.
    #[must_use]
    pub const fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: total.div_ceil(request.limit),
        }
    }
}

/// A page of items together with its [`PageMeta`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    meta: PageMeta,
}

impl<T> Page<T> {
    /// Wrap `items` served for `request` out of `total` items.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            meta: PageMeta::new(request, total),
        }
    }

    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Pagination metadata.
    #[must_use]
    pub const fn meta(&self) -> PageMeta {
        self.meta
    }

    /// Split the page into its items and metadata.
    #[must_use]
    pub fn into_parts(self) -> (Vec<T>, PageMeta) {
        (self.items, self.meta)
    }

    /// Project every item while keeping the metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
        }
    }
}
