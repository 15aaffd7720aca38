//! Named catalog search operations
//!
//! Endpoint-level entry points, each bound to a profile from
//! `catalog.toml`. Near-duplicate pairs stay distinct on purpose:
//!
//! | Operation | Input treatment | Blank input |
//! |-----------|-----------------|-------------|
//! | `search` | tokens across profile fields | all documents of type |
//! | `find_by_name` | one exact term on `name_field` | all documents of type |
//! | `find_by_names` | tokens on `name_field` | all documents of type |
//! | `find_by_title` | one exact term on `title_field` | all documents of type |
//! | `find_by_titles` | tokens on `title_field` | all documents of type |
//! | `find_by_query` | exact OR fuzzy lookup | all documents of type |
//! | `suggest` | facet values of `suggest_field` | empty set |

use crate::orchestrator::SearchOrchestrator;
use crate::projector::{Projected, SearchView};
use catalog_core::{
    CatalogConfig, CatalogProfile, Error, OffsetPageRequest, QueryExecutor, Result,
    SearchOptions, SearchResult,
};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Profile-driven catalog search endpoints
#[derive(Clone)]
pub struct CatalogSearch {
    orchestrator: SearchOrchestrator,
    config: Arc<CatalogConfig>,
}

impl CatalogSearch {
    /// Create catalog search over an executor and a loaded config
    pub fn new(executor: Arc<dyn QueryExecutor>, config: CatalogConfig) -> Self {
        CatalogSearch {
            orchestrator: SearchOrchestrator::new(executor),
            config: Arc::new(config),
        }
    }

    /// The loaded configuration
    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// The underlying orchestrator
    pub fn orchestrator(&self) -> &SearchOrchestrator {
        &self.orchestrator
    }

    fn resolve(&self, profile: &str) -> Result<(&CatalogProfile, SearchOptions)> {
        let p = self.config.profile(profile)?;
        Ok((p, p.search_options(&self.config)))
    }

    /// Tokenized search across the profile's fields
    pub fn search<V: SearchView>(
        &self,
        profile: &str,
        raw_term: Option<&str>,
        page: &OffsetPageRequest,
    ) -> Result<SearchResult<Projected<V>>> {
        let (_, options) = self.resolve(profile)?;
        self.orchestrator.search(raw_term, page, &options)
    }

    /// Documents whose name equals the whole input
    pub fn find_by_name<V: SearchView>(
        &self,
        profile: &str,
        name: Option<&str>,
        page: &OffsetPageRequest,
    ) -> Result<SearchResult<Projected<V>>> {
        let (p, options) = self.resolve(profile)?;
        self.orchestrator
            .search_exact(name, &p.name_field, page, &options)
    }

    /// Documents whose name contains the input's tokens
    pub fn find_by_names<V: SearchView>(
        &self,
        profile: &str,
        raw_term: Option<&str>,
        page: &OffsetPageRequest,
    ) -> Result<SearchResult<Projected<V>>> {
        let (p, options) = self.resolve(profile)?;
        self.orchestrator
            .search_field(raw_term, &p.name_field, page, &options)
    }

    /// Documents whose title equals the whole input
    pub fn find_by_title<V: SearchView>(
        &self,
        profile: &str,
        title: Option<&str>,
        page: &OffsetPageRequest,
    ) -> Result<SearchResult<Projected<V>>> {
        let (p, options) = self.resolve(profile)?;
        self.orchestrator
            .search_exact(title, &p.title_field, page, &options)
    }

    /// Documents whose title contains the input's tokens
    pub fn find_by_titles<V: SearchView>(
        &self,
        profile: &str,
        raw_term: Option<&str>,
        page: &OffsetPageRequest,
    ) -> Result<SearchResult<Projected<V>>> {
        let (p, options) = self.resolve(profile)?;
        self.orchestrator
            .search_field(raw_term, &p.title_field, page, &options)
    }

    /// Exact match on the lookup's exact field OR fuzzy match on its fuzzy field
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the profile has no `lookup` table.
    pub fn find_by_query<V: SearchView>(
        &self,
        profile: &str,
        raw_term: Option<&str>,
        page: &OffsetPageRequest,
    ) -> Result<SearchResult<Projected<V>>> {
        let (p, options) = self.resolve(profile)?;
        let lookup = p.lookup.as_ref().ok_or_else(|| {
            Error::invalid_argument(format!("profile '{}' has no lookup configured", profile))
        })?;
        self.orchestrator.lookup(raw_term, lookup, page, &options)
    }

    /// Autocomplete suggestions from the profile's suggest field
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if the profile has no `suggest_field`.
    pub fn suggest(&self, profile: &str, raw_term: Option<&str>) -> Result<BTreeSet<String>> {
        let (p, options) = self.resolve(profile)?;
        let field = p.suggest_field.as_deref().ok_or_else(|| {
            Error::invalid_argument(format!(
                "profile '{}' has no suggest_field configured",
                profile
            ))
        })?;
        self.orchestrator.suggest(raw_term, field, &options)
    }
}
