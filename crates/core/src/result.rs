//! Assembled search results

use crate::facet::FacetOutput;
use crate::highlight::HighlightMap;
use crate::page::OffsetPageRequest;
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of one search request
///
/// Built once per request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<T> {
    /// Items of the requested page, in ranking order
    pub items: Vec<T>,
    /// Total number of matches across all pages
    pub total: u64,
    /// Highlight maps keyed by entity id
    pub highlights: BTreeMap<String, HighlightMap>,
    /// Facet section
    pub facets: FacetOutput,
    /// Page descriptor the result was produced for
    pub page: OffsetPageRequest,
}

impl<T> SearchResult<T> {
    /// Create a result with no items and no facets
    pub fn empty(page: OffsetPageRequest) -> Self {
        SearchResult {
            items: vec![],
            total: 0,
            highlights: BTreeMap::new(),
            facets: FacetOutput::None,
            page,
        }
    }

    /// Check if the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items in this page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of pages of the current size needed to cover `total`
    pub fn total_pages(&self) -> u64 {
        let limit = self.page.limit();
        self.total / limit + u64::from(self.total % limit != 0)
    }

    /// Whether rows exist beyond this page
    pub fn has_next(&self) -> bool {
        self.page.offset().saturating_add(self.page.limit()) < self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result: SearchResult<String> = SearchResult::empty(OffsetPageRequest::default());
        assert!(result.is_empty());
        assert_eq!(result.len(), 0);
        assert_eq!(result.total, 0);
        assert_eq!(result.total_pages(), 0);
        assert!(!result.has_next());
        assert_eq!(result.facets, FacetOutput::None);
    }

    #[test]
    fn test_page_arithmetic() {
        let mut result: SearchResult<u32> =
            SearchResult::empty(OffsetPageRequest::new(5, 5).unwrap());
        result.total = 11;
        assert_eq!(result.total_pages(), 3);
        assert!(result.has_next());

        result.total = 10;
        assert_eq!(result.total_pages(), 2);
        assert!(!result.has_next());
    }
}
