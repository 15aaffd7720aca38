//! Shared document store for the in-process executors
//!
//! Holds documents in insertion order behind a `parking_lot::RwLock`.
//! Readers (query execution) never block each other; writers replace the
//! whole entry for an id.
//!
//! # Enabled Flag
//!
//! A store starts enabled. A disabled store rejects every query with an
//! `Execution` error, which stands in for an unreachable engine.
//!
//! # Version Watermark
//!
//! Incremented on every mutation. Executors can compare versions to notice
//! that the document set changed between two queries.

use catalog_core::{Error, RawDocument, Result};
use parking_lot::{RwLock, RwLockReadGuard};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

/// Documents in insertion order
pub struct DocumentStore {
    docs: RwLock<Vec<RawDocument>>,
    enabled: AtomicBool,
    version: AtomicU64,
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStore {
    /// Create an empty, enabled store
    pub fn new() -> Self {
        DocumentStore {
            docs: RwLock::new(Vec::new()),
            enabled: AtomicBool::new(true),
            version: AtomicU64::new(0),
        }
    }

    /// Create a store holding `documents`
    pub fn with_documents(documents: impl IntoIterator<Item = RawDocument>) -> Self {
        let store = Self::new();
        for doc in documents {
            store.insert(doc);
        }
        store
    }

    // ========================================================================
    // Enable/Disable
    // ========================================================================

    /// Check if the store accepts queries
    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    /// Accept queries again
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Release);
    }

    /// Reject all queries until re-enabled
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Release);
    }

    // ========================================================================
    // Version Watermark
    // ========================================================================

    /// Get current version
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Insert a document, replacing any existing one with the same id
    ///
    /// A replaced document keeps its original position.
    pub fn insert(&self, doc: RawDocument) {
        let mut docs = self.docs.write();
        match docs.iter_mut().find(|d| d.id == doc.id) {
            Some(existing) => {
                debug!(id = %doc.id, "Replacing document");
                *existing = doc;
            }
            None => docs.push(doc),
        }
        self.version.fetch_add(1, Ordering::Release);
    }

    /// Remove a document by id, returning it if present
    pub fn remove(&self, id: &str) -> Option<RawDocument> {
        let mut docs = self.docs.write();
        let pos = docs.iter().position(|d| d.id == id)?;
        let removed = docs.remove(pos);
        self.version.fetch_add(1, Ordering::Release);
        Some(removed)
    }

    /// Remove every document
    ///
    /// Does NOT change enabled state.
    pub fn clear(&self) {
        self.docs.write().clear();
        self.version.fetch_add(1, Ordering::Release);
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Number of stored documents
    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    /// Check if the store holds no documents
    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }

    /// Read access to the documents, failing if the store is disabled
    pub fn read(&self) -> Result<RwLockReadGuard<'_, Vec<RawDocument>>> {
        if !self.is_enabled() {
            return Err(Error::execution("document store is disabled"));
        }
        Ok(self.docs.read())
    }
}
