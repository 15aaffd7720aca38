//! In-memory ranked index executor
//!
//! Scans the [`DocumentStore`], scores every document against the criteria
//! and returns the requested page ranked by score (ties keep insertion
//! order). Fuzzy terms use edit distance. Facets are counted over all
//! matches, not just the page; highlights are produced for the page only.

use crate::eval::{score, FuzzyPolicy};
use crate::facet;
use crate::highlight::highlight;
use crate::store::DocumentStore;
use catalog_core::{IndexQuery, QueryExecutor, RawDocument, RawResults, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Documents between deadline checks
pub(crate) const DEADLINE_CHECK_INTERVAL: usize = 256;

/// Ranked full-text executor over a [`DocumentStore`]
pub struct MemoryIndex {
    store: Arc<DocumentStore>,
}

impl MemoryIndex {
    /// Create an executor over a shared store
    pub fn new(store: Arc<DocumentStore>) -> Self {
        MemoryIndex { store }
    }

    /// Create an executor over its own store holding `documents`
    pub fn from_documents(documents: impl IntoIterator<Item = RawDocument>) -> Self {
        Self::new(Arc::new(DocumentStore::with_documents(documents)))
    }

    /// The backing store
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }
}

impl QueryExecutor for MemoryIndex {
    fn execute(&self, query: &IndexQuery) -> Result<RawResults> {
        let started = Instant::now();
        let docs = self.store.read()?;

        let mut scored: Vec<(u32, usize)> = Vec::new();
        for (position, doc) in docs.iter().enumerate() {
            if position % DEADLINE_CHECK_INTERVAL == 0 {
                query.check_deadline(started)?;
            }
            if let Some(s) = score(&query.criteria, doc, FuzzyPolicy::EditDistance) {
                scored.push((s, position));
            }
        }
        query.check_deadline(started)?;

        // Stable: equal scores keep insertion order
        scored.sort_by(|a, b| b.0.cmp(&a.0));

        let matched = scored.iter().map(|&(_, position)| &docs[position]);
        let facet_pages = facet::count(&query.facet_fields, matched.clone());

        let items: Vec<RawDocument> = matched
            .skip(usize::try_from(query.page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.page.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        let terms = query.criteria.terms();
        let mut highlights = HashMap::new();
        if !query.highlight_fields.is_empty() {
            for doc in &items {
                let map = highlight(doc, &query.highlight_fields, &terms);
                if !map.is_empty() {
                    highlights.insert(doc.id.clone(), map);
                }
            }
        }

        debug!(
            matched = scored.len(),
            returned = items.len(),
            version = self.store.version(),
            "Memory index query complete"
        );

        Ok(RawResults {
            items,
            total: scored.len() as u64,
            highlights,
            facet_pages,
        })
    }

    fn name(&self) -> &str {
        "memory-index"
    }
}
