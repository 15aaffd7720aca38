//! Query execution boundary
//!
//! [`QueryExecutor`] is the single seam between the search pipeline and an
//! index engine. Everything upstream of [`QueryExecutor::execute`] is a pure
//! transformation; everything the executor returns is raw engine output.

use crate::criteria::Criteria;
use crate::document::RawDocument;
use crate::error::{Error, Result};
use crate::facet::FacetPage;
use crate::highlight::HighlightMap;
use crate::page::OffsetPageRequest;
use std::collections::HashMap;
use std::time::Instant;

/// Query as handed to an executor
#[derive(Debug, Clone)]
pub struct IndexQuery {
    /// Criteria tree to evaluate
    pub criteria: Criteria,
    /// Window of rows to return
    pub page: OffsetPageRequest,
    /// Fields to compute facet counts for
    pub facet_fields: Vec<String>,
    /// Fields to produce highlight snippets for
    pub highlight_fields: Vec<String>,
    /// Absolute deadline, if the caller supplied one
    pub deadline: Option<Instant>,
}

impl IndexQuery {
    /// Create a query with no facets, highlights or deadline
    pub fn new(criteria: Criteria, page: OffsetPageRequest) -> Self {
        IndexQuery {
            criteria,
            page,
            facet_fields: vec![],
            highlight_fields: vec![],
            deadline: None,
        }
    }

    /// Builder: set facet fields
    pub fn with_facets(mut self, fields: Vec<String>) -> Self {
        self.facet_fields = fields;
        self
    }

    /// Builder: set highlight fields
    pub fn with_highlights(mut self, fields: Vec<String>) -> Self {
        self.highlight_fields = fields;
        self
    }

    /// Builder: set deadline
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Fail with `DeadlineExceeded` if the deadline has passed
    ///
    /// Executors call this between units of work. `started` is used only to
    /// report elapsed time.
    pub fn check_deadline(&self, started: Instant) -> Result<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(Error::DeadlineExceeded {
                elapsed_micros: started.elapsed().as_micros() as u64,
            }),
            _ => Ok(()),
        }
    }
}

/// Raw, unprojected executor output
#[derive(Debug, Clone, Default)]
pub struct RawResults {
    /// Entities in the requested page, in ranking order
    pub items: Vec<RawDocument>,
    /// Total number of matching entities across all pages
    pub total: u64,
    /// Highlight fragments keyed by entity id
    pub highlights: HashMap<String, HighlightMap>,
    /// One facet page per requested facet field
    pub facet_pages: Vec<FacetPage>,
}

impl RawResults {
    /// Results with nothing in them
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Index engine client
///
/// Implementations must be `Send + Sync`; the pipeline holds them behind an
/// `Arc` and calls them from concurrent requests. `execute` is the only
/// possibly-blocking call in a search and must honour
/// [`IndexQuery::deadline`].
pub trait QueryExecutor: Send + Sync {
    /// Evaluate the query and return one page of raw results
    fn execute(&self, query: &IndexQuery) -> Result<RawResults>;

    /// Name for debugging and logging
    fn name(&self) -> &str;
}
