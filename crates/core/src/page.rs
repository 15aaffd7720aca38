//! Offset-based pagination
//!
//! [`OffsetPageRequest`] describes a window of rows by start offset and row
//! limit. Engines that only understand page-number paging use the derived
//! [`page_index`](OffsetPageRequest::page_index), which is only meaningful
//! while the limit stays constant across a paging sequence.

use crate::error::{Error, Result};
use serde::Serialize;

/// Default number of rows per page
pub const DEFAULT_PAGE_LIMIT: u64 = 20;

/// Immutable pagination descriptor
///
/// # Invariants
///
/// - `offset >= 0`
/// - `limit > 0`
///
/// Both are checked at construction; there are no mutation methods.
///
/// # Example
///
/// ```
/// use catalog_core::OffsetPageRequest;
///
/// let page = OffsetPageRequest::new(10, 5).unwrap();
/// assert_eq!(page.page_index(), 2);
/// assert!(OffsetPageRequest::new(-1, 5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct OffsetPageRequest {
    offset: u64,
    limit: u64,
}

impl OffsetPageRequest {
    /// Create a page request, validating offset and limit
    pub fn new(offset: i64, limit: i64) -> Result<Self> {
        if offset < 0 {
            return Err(Error::invalid_argument(format!(
                "offset must be non-negative, got {}",
                offset
            )));
        }
        if limit <= 0 {
            return Err(Error::invalid_argument(format!(
                "limit must be greater than zero, got {}",
                limit
            )));
        }
        Ok(OffsetPageRequest {
            offset: offset as u64,
            limit: limit as u64,
        })
    }

    /// First page with the given limit
    pub fn first(limit: i64) -> Result<Self> {
        Self::new(0, limit)
    }

    /// Start-row offset
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Maximum rows in the page
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Zero-based page number for page-number engines
    pub fn page_index(&self) -> u64 {
        self.offset / self.limit
    }

    /// Page size for page-number engines
    pub fn page_size(&self) -> u64 {
        self.limit
    }

    /// The following page
    pub fn next(&self) -> Self {
        OffsetPageRequest {
            offset: self.offset.saturating_add(self.limit),
            limit: self.limit,
        }
    }

    /// The preceding page, or the first page when already at the start
    pub fn previous_or_first(&self) -> Self {
        OffsetPageRequest {
            offset: self.offset.saturating_sub(self.limit),
            limit: self.limit,
        }
    }

    /// Whether a preceding page exists
    pub fn has_previous(&self) -> bool {
        self.offset > 0
    }
}

impl Default for OffsetPageRequest {
    fn default() -> Self {
        OffsetPageRequest {
            offset: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}
