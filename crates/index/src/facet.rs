//! Facet counting over matched documents
//!
//! A document counts once per distinct value it carries, however many
//! times the value repeats in an array field.

use catalog_core::{FacetEntry, FacetPage, RawDocument};
use std::collections::{BTreeSet, HashMap};

/// One facet page per field, counted over every matched document
///
/// Entries are ordered by count descending, then value ascending.
pub fn count<'a>(
    fields: &[String],
    matched: impl IntoIterator<Item = &'a RawDocument> + Clone,
) -> Vec<FacetPage> {
    fields
        .iter()
        .map(|field| count_field(field, matched.clone()))
        .collect()
}

fn count_field<'a>(field: &str, matched: impl IntoIterator<Item = &'a RawDocument>) -> FacetPage {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for doc in matched {
        let distinct: BTreeSet<String> = doc.text_values(field).into_iter().collect();
        for value in distinct {
            *counts.entry(value).or_insert(0) += 1;
        }
    }

    let mut entries: Vec<FacetEntry> = counts
        .into_iter()
        .map(|(value, count)| FacetEntry::new(value, count))
        .collect();
    entries.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    FacetPage::new(field, entries)
}
