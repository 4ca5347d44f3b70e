//! Pagination primitives shared by backend list endpoints.
//!
//! Purpose: keep page arithmetic and the serialised pagination envelope in
//! one place so HTTP adapters and repository adapters agree on how result
//! sets are sliced and described.
//!
//! Public surface:
//! - [`PageRequest`] — validated 1-based page number plus page size.
//! - [`PaginationMetadata`] — derived projection returned alongside (not
//!   inside) a resource list, serialised camelCase.
//! - [`PAGINATION_HEADER`] — response header carrying the serialised
//!   metadata.

use serde::{Deserialize, Serialize};

/// Response header carrying the serialised [`PaginationMetadata`].
pub const PAGINATION_HEADER: &str = "X-Pagination";

/// Errors raised by pagination constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PaginationError {
    /// The page size must be a positive integer.
    #[error("page size must be greater than zero")]
    InvalidPageSize,
}

/// Validated slice request: 1-based page number and a positive page size.
///
/// The constructor clamps out-of-range input instead of failing: page sizes
/// are capped at the caller-supplied maximum and raised to at least 1, and
/// page numbers below 1 become 1. The original inputs are not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
}

impl PageRequest {
    /// Build a request, clamping the page size into `1..=max_page_size` and
    /// the page number to at least 1.
    #[must_use]
    pub fn clamped(page_number: u32, page_size: u32, max_page_size: u32) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.clamp(1, max_page_size.max(1)),
        }
    }

    /// 1-based page number.
    #[must_use]
    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    /// Number of items per page, always positive.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of items to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> i64 {
        i64::from(self.page_number - 1) * i64::from(self.page_size)
    }

    /// Maximum number of items on this page.
    #[must_use]
    pub fn limit(&self) -> i64 {
        i64::from(self.page_size)
    }
}

/// Summary describing how a result set was sliced.
///
/// Serialises camelCase, e.g.
/// `{"totalItemCount":2,"pageSize":1,"currentPage":1,"totalPages":2}`.
/// Never persisted; recomputed per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMetadata {
    total_item_count: u64,
    page_size: u32,
    current_page: u32,
    total_pages: u64,
}

impl PaginationMetadata {
    /// Derive metadata from a total match count and the requested slice.
    ///
    /// # Errors
    ///
    /// Returns [`PaginationError::InvalidPageSize`] when `page_size` is zero.
    pub fn new(
        total_item_count: u64,
        page_size: u32,
        current_page: u32,
    ) -> Result<Self, PaginationError> {
        if page_size == 0 {
            return Err(PaginationError::InvalidPageSize);
        }
        Ok(Self {
            total_item_count,
            page_size,
            current_page,
            total_pages: total_item_count.div_ceil(u64::from(page_size)),
        })
    }

    /// Derive metadata for a validated [`PageRequest`].
    ///
    /// Infallible because [`PageRequest`] guarantees a positive page size.
    #[must_use]
    pub fn for_page(total_item_count: u64, page: &PageRequest) -> Self {
        Self {
            total_item_count,
            page_size: page.page_size(),
            current_page: page.page_number(),
            total_pages: total_item_count.div_ceil(u64::from(page.page_size())),
        }
    }

    /// Total number of items matching the query before slicing.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.total_item_count
    }

    /// Page size the slice was computed with.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 1-based page number of the returned slice.
    #[must_use]
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total number of pages: `ceil(total_item_count / page_size)`.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total_pages
    }
}
