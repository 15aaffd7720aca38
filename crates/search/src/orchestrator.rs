//! Search pipeline orchestration
//!
//! ```text
//! raw term
//!    │
//!    ▼
//! normalize ──(no tokens)──► empty-input policy ──► type-only query | empty result
//!    │
//!    ▼
//! CriteriaBuilder
//!    │
//!    ▼
//! QueryExecutor::execute(criteria, page)      (only blocking step)
//!    │
//!    ├──► project      (items + highlights)
//!    └──► aggregate    (facets)
//!            │
//!            ▼
//!      SearchResult
//! ```
//!
//! The orchestrator is stateless: it holds only an `Arc` to the executor.
//! Every call builds its own tokens, criteria and query, runs once, and
//! reports executor or conversion failures unchanged. There is no retry and
//! no fallback to partial results.

use crate::builder::CriteriaBuilder;
use crate::facets::{aggregate, filtered_values};
use crate::projector::{project_all, Projected, SearchView};
use crate::tokenizer::{join, normalize, SearchToken};
use catalog_core::{
    Combination, Criteria, EmptyInputPolicy, FacetMode, FacetOutput, IndexQuery, LookupConfig,
    OffsetPageRequest, QueryExecutor, RawResults, Result, SearchOptions, SearchResult,
};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};

/// Composes normalization, criteria building, execution and projection
#[derive(Clone)]
pub struct SearchOrchestrator {
    executor: Arc<dyn QueryExecutor>,
}

impl SearchOrchestrator {
    /// Create an orchestrator over the given executor
    pub fn new(executor: Arc<dyn QueryExecutor>) -> Self {
        SearchOrchestrator { executor }
    }

    /// Name of the underlying executor
    pub fn executor_name(&self) -> &str {
        self.executor.name()
    }

    // ========================================================================
    // Query shapes
    // ========================================================================

    /// Tokenized search: per-token OR across `options.fields`
    pub fn search<V: SearchView>(
        &self,
        raw_term: Option<&str>,
        page: &OffsetPageRequest,
        options: &SearchOptions,
    ) -> Result<SearchResult<Projected<V>>> {
        let tokens = normalize(raw_term);
        let builder = CriteriaBuilder::from_options(options);
        if tokens.is_empty() {
            return self.on_empty_input(&builder, page, options);
        }
        self.run(builder.for_tokens(&tokens), page, options)
    }

    /// Tokenized search restricted to one field
    pub fn search_field<V: SearchView>(
        &self,
        raw_term: Option<&str>,
        field: &str,
        page: &OffsetPageRequest,
        options: &SearchOptions,
    ) -> Result<SearchResult<Projected<V>>> {
        let fields = [field.to_string()];
        let tokens = normalize(raw_term);
        let builder = CriteriaBuilder::from_options(options).on_fields(&fields);
        if tokens.is_empty() {
            return self.on_empty_input(&builder, page, options);
        }
        self.run(builder.for_tokens(&tokens), page, options)
    }

    /// The whole input as one exact term on one field
    pub fn search_exact<V: SearchView>(
        &self,
        raw_term: Option<&str>,
        field: &str,
        page: &OffsetPageRequest,
        options: &SearchOptions,
    ) -> Result<SearchResult<Projected<V>>> {
        let builder = CriteriaBuilder::from_options(options);
        match raw_term {
            Some(term) if !normalize(Some(term)).is_empty() => {
                self.run(builder.exact_term(field, term), page, options)
            }
            _ => self.on_empty_input(&builder, page, options),
        }
    }

    /// Two-branch boosted lookup: exact on one field OR fuzzy on another
    pub fn lookup<V: SearchView>(
        &self,
        raw_term: Option<&str>,
        lookup: &LookupConfig,
        page: &OffsetPageRequest,
        options: &SearchOptions,
    ) -> Result<SearchResult<Projected<V>>> {
        let builder = CriteriaBuilder::from_options(options);
        match raw_term {
            Some(term) if !normalize(Some(term)).is_empty() => {
                self.run(builder.boosted_lookup(term, lookup), page, options)
            }
            _ => self.on_empty_input(&builder, page, options),
        }
    }

    /// Autocomplete: facet values of `field` containing the typed text
    ///
    /// Blank input never suggests anything and never reaches the executor.
    pub fn suggest(
        &self,
        raw_term: Option<&str>,
        field: &str,
        options: &SearchOptions,
    ) -> Result<BTreeSet<String>> {
        let tokens = normalize(raw_term);
        if tokens.is_empty() {
            debug!(field, "Blank autocomplete input, no suggestions");
            return Ok(BTreeSet::new());
        }

        let fields = [field.to_string()];
        let criteria = CriteriaBuilder::from_options(options)
            .on_fields(&fields)
            .with_combination(Combination::Any)
            .for_tokens(&tokens);
        let page = OffsetPageRequest::new(0, 1)?;
        let query = self.query(criteria, page, vec![field.to_string()], vec![], options);

        let raw = self.execute(&query, Instant::now())?;
        Ok(filtered_values(&raw.facet_pages, &filter_text(&tokens)))
    }

    // ========================================================================
    // Pipeline
    // ========================================================================

    fn on_empty_input<V: SearchView>(
        &self,
        builder: &CriteriaBuilder<'_>,
        page: &OffsetPageRequest,
        options: &SearchOptions,
    ) -> Result<SearchResult<Projected<V>>> {
        match options.empty_input {
            EmptyInputPolicy::MatchAllOfType => {
                debug!(
                    document_type = %options.document_type,
                    "Blank input, returning all documents of type"
                );
                self.run(builder.type_only(), page, options)
            }
            EmptyInputPolicy::EmptyResult => {
                debug!("Blank input, returning empty result");
                Ok(SearchResult::empty(*page))
            }
        }
    }

    fn query(
        &self,
        criteria: Criteria,
        page: OffsetPageRequest,
        facet_fields: Vec<String>,
        highlight_fields: Vec<String>,
        options: &SearchOptions,
    ) -> IndexQuery {
        let query = IndexQuery::new(criteria, page)
            .with_facets(facet_fields)
            .with_highlights(highlight_fields);
        match options.timeout {
            Some(timeout) => query.with_deadline(Instant::now() + timeout),
            None => query,
        }
    }

    fn execute(&self, query: &IndexQuery, started: Instant) -> Result<RawResults> {
        debug!(
            executor = self.executor.name(),
            criteria = %query.criteria,
            offset = query.page.offset(),
            limit = query.page.limit(),
            "Executing search"
        );
        self.executor.execute(query).map_err(|e| {
            warn!(
                executor = self.executor.name(),
                elapsed_micros = started.elapsed().as_micros() as u64,
                error = %e,
                "Search execution failed"
            );
            e
        })
    }

    fn run<V: SearchView>(
        &self,
        criteria: Criteria,
        page: &OffsetPageRequest,
        options: &SearchOptions,
    ) -> Result<SearchResult<Projected<V>>> {
        let started = Instant::now();

        let facet_fields = match options.facet_mode {
            FacetMode::None => vec![],
            FacetMode::Counts | FacetMode::CountsByField => options.facet_fields.clone(),
        };
        let query = self.query(
            criteria,
            *page,
            facet_fields,
            options.highlight_fields.clone(),
            options,
        );

        let raw = self.execute(&query, started)?;
        let items: Vec<Projected<V>> = project_all(&raw.items, |id| raw.highlights.get(id))?;

        let highlights: BTreeMap<_, _> = items
            .iter()
            .map(|item| (item.id.clone(), item.highlights.clone()))
            .collect();
        let facets = if query.facet_fields.is_empty() {
            FacetOutput::None
        } else {
            aggregate(&raw.facet_pages, options.facet_mode)
        };

        debug!(
            total = raw.total,
            returned = items.len(),
            elapsed_micros = started.elapsed().as_micros() as u64,
            "Search complete"
        );

        Ok(SearchResult {
            items,
            total: raw.total,
            highlights,
            facets,
            page: *page,
        })
    }
}

/// Text that suggestions must contain
fn filter_text(tokens: &[SearchToken]) -> String {
    join(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Error, FacetEntry, FacetPage, HighlightMap, RawDocument};
    use doubles::RecordingExecutor;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct TitleView {
        title: String,
    }

    impl SearchView for TitleView {
        const FIELDS: &'static [&'static str] = &["title"];
    }

    mod doubles {
        use super::*;
        use std::sync::Mutex;

        pub struct RecordingExecutor {
            pub response: std::result::Result<RawResults, Error>,
            pub seen: Mutex<Vec<IndexQuery>>,
        }

        impl RecordingExecutor {
            pub fn returning(results: RawResults) -> Self {
                RecordingExecutor {
                    response: Ok(results),
                    seen: Mutex::new(vec![]),
                }
            }

            pub fn failing(err: Error) -> Self {
                RecordingExecutor {
                    response: Err(err),
                    seen: Mutex::new(vec![]),
                }
            }

            pub fn calls(&self) -> Vec<IndexQuery> {
                self.seen.lock().unwrap().clone()
            }
        }

        impl QueryExecutor for RecordingExecutor {
            fn execute(&self, query: &IndexQuery) -> Result<RawResults> {
                self.seen.lock().unwrap().push(query.clone());
                self.response.clone()
            }

            fn name(&self) -> &str {
                "recording"
            }
        }
    }

    fn island_results() -> RawResults {
        let mut results = RawResults::empty();
        results.items = vec![RawDocument::new("07").with_field("title", "Secret Island")];
        results.total = 1;
        results.highlights.insert(
            "07".into(),
            HighlightMap::new().with("title", vec!["Secret <em>Island</em>".into()]),
        );
        results.facet_pages = vec![FacetPage::new(
            "tags",
            vec![FacetEntry::new("cookies", 3), FacetEntry::new("book", 1)],
        )];
        results
    }

    fn options() -> SearchOptions {
        SearchOptions::new("category")
            .with_fields(vec!["title".into()])
            .with_facet_fields(vec!["tags".into()])
            .with_highlight_fields(vec!["title".into()])
    }

    fn orchestrator(executor: Arc<RecordingExecutor>) -> SearchOrchestrator {
        SearchOrchestrator::new(executor)
    }

    #[test]
    fn test_search_assembles_result() {
        let executor = Arc::new(RecordingExecutor::returning(island_results()));
        let result = orchestrator(executor.clone())
            .search::<TitleView>(Some("Island"), &OffsetPageRequest::default(), &options())
            .unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.items[0].view.title, "Secret Island");
        assert_eq!(
            result.highlights["07"].get("title").unwrap(),
            ["Secret <em>Island</em>"]
        );
        match &result.facets {
            FacetOutput::Counts(counts) => assert_eq!(counts.get("cookies"), Some(&3)),
            other => panic!("Expected counts, got {:?}", other),
        }

        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].criteria.to_string(),
            "title:*Island* AND type:\"category\""
        );
        assert_eq!(calls[0].facet_fields, vec!["tags"]);
    }

    #[test]
    fn test_blank_input_match_all_of_type() {
        let executor = Arc::new(RecordingExecutor::returning(RawResults::empty()));
        orchestrator(executor.clone())
            .search::<TitleView>(Some(" !! "), &OffsetPageRequest::default(), &options())
            .unwrap();

        let calls = executor.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].criteria, Criteria::equals("type", "category"));
    }

    #[test]
    fn test_blank_input_empty_result_skips_executor() {
        let executor = Arc::new(RecordingExecutor::returning(island_results()));
        let options = options().with_empty_input(EmptyInputPolicy::EmptyResult);
        let result = orchestrator(executor.clone())
            .search::<TitleView>(None, &OffsetPageRequest::default(), &options)
            .unwrap();

        assert!(result.is_empty());
        assert_eq!(result.total, 0);
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn test_execution_error_propagates_unmodified() {
        let executor = Arc::new(RecordingExecutor::failing(Error::execution("index down")));
        let err = orchestrator(executor)
            .search::<TitleView>(Some("x"), &OffsetPageRequest::default(), &options())
            .unwrap_err();
        assert_eq!(err, Error::execution("index down"));
    }

    #[test]
    fn test_conversion_error_propagates() {
        let mut results = RawResults::empty();
        results.items = vec![RawDocument::new("1").with_field("title", 42)];
        results.total = 1;
        let executor = Arc::new(RecordingExecutor::returning(results));

        let err = orchestrator(executor)
            .search::<TitleView>(Some("x"), &OffsetPageRequest::default(), &options())
            .unwrap_err();
        assert!(matches!(err, Error::Conversion { .. }));
    }

    #[test]
    fn test_facet_mode_none_requests_no_facets() {
        let executor = Arc::new(RecordingExecutor::returning(island_results()));
        let options = options().with_facet_mode(FacetMode::None);
        let result = orchestrator(executor.clone())
            .search::<TitleView>(Some("x"), &OffsetPageRequest::default(), &options)
            .unwrap();

        assert_eq!(result.facets, FacetOutput::None);
        assert!(executor.calls()[0].facet_fields.is_empty());
    }

    #[test]
    fn test_timeout_sets_deadline() {
        let executor = Arc::new(RecordingExecutor::returning(RawResults::empty()));
        let options = options().with_timeout(std::time::Duration::from_secs(5));
        orchestrator(executor.clone())
            .search::<TitleView>(Some("x"), &OffsetPageRequest::default(), &options)
            .unwrap();
        assert!(executor.calls()[0].deadline.is_some());
    }

    #[test]
    fn test_suggest_filters_facet_values() {
        let executor = Arc::new(RecordingExecutor::returning(island_results()));
        let values = orchestrator(executor.clone())
            .suggest(Some("coo"), "tags", &options())
            .unwrap();

        assert_eq!(values.into_iter().collect::<Vec<_>>(), vec!["cookies"]);
        let calls = executor.calls();
        assert_eq!(calls[0].facet_fields, vec!["tags"]);
        assert_eq!(calls[0].criteria.to_string(), "tags:*coo* AND type:\"category\"");
    }

    #[test]
    fn test_suggest_blank_input_is_empty_without_executing() {
        let executor = Arc::new(RecordingExecutor::returning(island_results()));
        let values = orchestrator(executor.clone())
            .suggest(Some("   "), "tags", &options())
            .unwrap();
        assert!(values.is_empty());
        assert!(executor.calls().is_empty());
    }

    #[test]
    fn test_search_exact_keeps_whole_term() {
        let executor = Arc::new(RecordingExecutor::returning(RawResults::empty()));
        orchestrator(executor.clone())
            .search_exact::<TitleView>(
                Some("Secret Island"),
                "title",
                &OffsetPageRequest::default(),
                &options(),
            )
            .unwrap();
        assert_eq!(
            executor.calls()[0].criteria.to_string(),
            "title:\"Secret Island\" AND type:\"category\""
        );
    }

    #[test]
    fn test_lookup_two_branches() {
        let executor = Arc::new(RecordingExecutor::returning(RawResults::empty()));
        let lookup = LookupConfig {
            exact_field: "sku".into(),
            fuzzy_field: "title".into(),
            exact_boost: 4,
        };
        orchestrator(executor.clone())
            .lookup::<TitleView>(Some("ABC-1"), &lookup, &OffsetPageRequest::default(), &options())
            .unwrap();
        assert_eq!(
            executor.calls()[0].criteria.to_string(),
            "(sku:\"ABC-1\"^4 OR title:ABC-1~) AND type:\"category\""
        );
    }
}
