//! Catalog search: query composition, paging and result projection over a
//! pluggable index
//!
//! The pipeline turns a raw user term into a backend-neutral criteria tree,
//! runs it through a [`QueryExecutor`], and projects the raw hits into typed
//! views with highlights and facet aggregates.
//!
//! # Quick Start
//!
//! ```ignore
//! use catalog::{load_catalog, DocumentStore, OffsetPageRequest};
//! use std::sync::Arc;
//!
//! let store = Arc::new(DocumentStore::with_documents(documents));
//! let catalog = load_catalog(Path::new("catalog.toml"), store)?;
//!
//! let page = OffsetPageRequest::new(0, 10)?;
//! let result = catalog.search::<CategoryView>("category", Some("Island Planet"), &page)?;
//! ```
//!
//! # Architecture
//!
//! - `catalog-core`: value types, configuration and the executor boundary
//! - `catalog-search`: tokenizer, criteria builder, projector, facets and
//!   the orchestrator
//! - `catalog-index`: in-process executors (ranked index and SQL-style table)

pub use catalog_core::*;
pub use catalog_index::{
    open_executor, to_where_clause, DocumentStore, MemoryIndex, SqlClause, TableStore,
};
pub use catalog_search::*;

use std::path::Path;
use std::sync::Arc;

/// Wire the configured executor over `store` into a [`CatalogSearch`]
///
/// # Errors
///
/// Returns `Error::Config` if the configuration fails validation.
pub fn open_catalog(config: CatalogConfig, store: Arc<DocumentStore>) -> Result<CatalogSearch> {
    config.validate()?;
    let executor = open_executor(config.backend, store);
    Ok(CatalogSearch::new(executor, config))
}

/// Load `catalog.toml` from `path` and open a catalog over `store`
pub fn load_catalog(path: &Path, store: Arc<DocumentStore>) -> Result<CatalogSearch> {
    open_catalog(CatalogConfig::from_file(path)?, store)
}
