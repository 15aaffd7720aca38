//! Query composition and result projection for catalog search
//!
//! This crate provides:
//! - Tokenizer: raw input → ordered, punctuation-free search tokens
//! - CriteriaBuilder: tokens + fields + boosts + type → criteria tree
//! - Projector: raw documents + highlights → typed views
//! - Facet aggregation: facet pages → count maps or filtered value sets
//! - SearchOrchestrator: the per-request pipeline over a `QueryExecutor`
//! - CatalogSearch: profile-driven named endpoint operations
//!
//! # Usage
//!
//! ```ignore
//! use catalog_search::CatalogSearch;
//!
//! let catalog = CatalogSearch::new(executor, config);
//! let page = OffsetPageRequest::new(0, 10)?;
//! let result = catalog.search::<CategoryView>("category", Some("Island Planet"), &page)?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod catalog;
pub mod facets;
pub mod orchestrator;
pub mod projector;
pub mod tokenizer;

// Re-export commonly used types
pub use builder::CriteriaBuilder;
pub use catalog::CatalogSearch;
pub use facets::{aggregate, counts_by_field, counts_map, filtered_values};
pub use orchestrator::SearchOrchestrator;
pub use projector::{project, project_all, Projected, SearchView};
pub use tokenizer::{normalize, tokenize, SearchToken};
