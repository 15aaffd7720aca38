//! Facet aggregation
//!
//! Converts the executor's per-field [`FacetPage`]s into response shapes:
//! - [`counts_map`]: flat value → count map across all fields
//! - [`counts_by_field`]: field → value → count
//! - [`filtered_values`]: values containing a filter term (autocomplete)

use catalog_core::{FacetCountMap, FacetMode, FacetOutput, FacetPage, FieldFacetCounts};
use std::collections::{BTreeSet, HashMap};
use tracing::warn;

/// Flatten every (field, value, count) into one value → count map
///
/// When two different fields produce the same value, the later page wins
/// and a warning is logged. Use [`counts_by_field`] to keep them apart.
pub fn counts_map(pages: &[FacetPage]) -> FacetCountMap {
    let mut counts = FacetCountMap::new();
    let mut origin: HashMap<&str, &str> = HashMap::new();

    for page in pages {
        for entry in &page.entries {
            if let Some(previous) = origin.insert(&entry.value, &page.field) {
                if previous != page.field {
                    warn!(
                        value = %entry.value,
                        earlier_field = previous,
                        later_field = %page.field,
                        "Facet value collision across fields, later count overwrites earlier"
                    );
                }
            }
            counts.insert(entry.value.clone(), entry.count);
        }
    }
    counts
}

/// Facet counts keyed by field, then value
pub fn counts_by_field(pages: &[FacetPage]) -> FieldFacetCounts {
    let mut by_field = FieldFacetCounts::new();
    for page in pages {
        let counts = by_field.entry(page.field.clone()).or_default();
        for entry in &page.entries {
            counts.insert(entry.value.clone(), entry.count);
        }
    }
    by_field
}

/// Facet values whose text contains `filter` (case-sensitive)
///
/// A blank filter yields an empty set.
pub fn filtered_values(pages: &[FacetPage], filter: &str) -> BTreeSet<String> {
    if filter.trim().is_empty() {
        return BTreeSet::new();
    }
    pages
        .iter()
        .flat_map(|page| page.entries.iter())
        .filter(|entry| entry.value.contains(filter))
        .map(|entry| entry.value.clone())
        .collect()
}

/// Assemble the facet section for a search in the given mode
pub fn aggregate(pages: &[FacetPage], mode: FacetMode) -> FacetOutput {
    match mode {
        FacetMode::Counts => FacetOutput::Counts(counts_map(pages)),
        FacetMode::CountsByField => FacetOutput::ByField(counts_by_field(pages)),
        FacetMode::None => FacetOutput::None,
    }
}
