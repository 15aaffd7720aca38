//! In-process query executors for catalog search
//!
//! This crate provides two interchangeable [`QueryExecutor`]s over a shared
//! [`DocumentStore`]:
//! - MemoryIndex: ranked full-text engine (boosts, edit-distance fuzzy
//!   match, highlights)
//! - TableStore: relational table semantics (insertion order, `LIKE`
//!   matching, no highlights) plus a parameterized `WHERE` renderer
//!
//! Select one with [`open_executor`] from the configured [`BackendKind`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod eval;
pub mod facet;
pub mod highlight;
pub mod memory;
pub mod store;
pub mod table;
pub mod text;

pub use eval::{matches, score, FuzzyPolicy};
pub use memory::MemoryIndex;
pub use store::DocumentStore;
pub use table::{to_where_clause, SqlClause, TableStore};

use catalog_core::{BackendKind, QueryExecutor};
use std::sync::Arc;
use tracing::info;

/// Open the executor for `kind` over a shared store
pub fn open_executor(kind: BackendKind, store: Arc<DocumentStore>) -> Arc<dyn QueryExecutor> {
    let executor: Arc<dyn QueryExecutor> = match kind {
        BackendKind::Index => Arc::new(MemoryIndex::new(store)),
        BackendKind::Table => Arc::new(TableStore::new(store)),
    };
    info!(executor = executor.name(), "Opened query executor");
    executor
}
