//! Core types and traits for catalog search
//!
//! This crate defines the request-scoped value types shared by the search
//! pipeline and its executors:
//! - Error: Error taxonomy (InvalidArgument, Conversion, Execution, ...)
//! - OffsetPageRequest: Offset/limit pagination descriptor
//! - RawDocument: Raw entity returned by an executor
//! - Criteria: Backend-neutral boolean criteria tree
//! - HighlightMap: Ordered field → snippets map
//! - FacetPage, FacetOutput: Raw and aggregated facet data
//! - SearchResult: Assembled response
//! - QueryExecutor: The index engine boundary
//! - SearchOptions, CatalogConfig: Configuration (`catalog.toml`)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod criteria;
pub mod document;
pub mod error;
pub mod executor;
pub mod facet;
pub mod highlight;
pub mod page;
pub mod result;

pub use config::{
    BackendKind, CatalogConfig, CatalogProfile, EmptyInputPolicy, LookupConfig, SearchOptions,
    CONFIG_FILE_NAME, DEFAULT_TYPE_FIELD,
};
pub use criteria::{Combination, Criteria, MatchMode, Term};
pub use document::{RawDocument, ID_FIELD};
pub use error::{Error, Result};
pub use executor::{IndexQuery, QueryExecutor, RawResults};
pub use facet::{FacetCountMap, FacetEntry, FacetMode, FacetOutput, FacetPage, FieldFacetCounts};
pub use highlight::{HighlightMap, EMPHASIS_CLOSE, EMPHASIS_OPEN};
pub use page::{OffsetPageRequest, DEFAULT_PAGE_LIMIT};
pub use result::SearchResult;
