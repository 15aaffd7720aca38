//! Facet types
//!
//! Executors return one [`FacetPage`] per requested facet field. The
//! aggregation into response shapes lives in `catalog-search`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// One distinct value of a faceted field and its document count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetEntry {
    /// Field value
    pub value: String,
    /// Number of matching documents carrying the value
    pub count: u64,
}

impl FacetEntry {
    /// Create a facet entry
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        FacetEntry {
            value: value.into(),
            count,
        }
    }
}

/// Facet counts for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetPage {
    /// Faceted field
    pub field: String,
    /// Value counts, highest count first
    pub entries: Vec<FacetEntry>,
}

impl FacetPage {
    /// Create a facet page
    pub fn new(field: impl Into<String>, entries: Vec<FacetEntry>) -> Self {
        FacetPage {
            field: field.into(),
            entries,
        }
    }
}

/// Facet value → count, flattened across fields
pub type FacetCountMap = BTreeMap<String, u64>;

/// Field → (facet value → count)
pub type FieldFacetCounts = BTreeMap<String, FacetCountMap>;

/// Which facet shape a search assembles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetMode {
    /// Flat value → count map; a value seen under two fields keeps the later count
    #[default]
    Counts,
    /// Counts keyed by field, then value
    CountsByField,
    /// No facet aggregation
    None,
}

/// Facet section of a search result
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacetOutput {
    /// Facets were not requested
    #[default]
    None,
    /// Flat value → count map
    Counts(FacetCountMap),
    /// Per-field value → count maps
    ByField(FieldFacetCounts),
    /// Filtered, duplicate-free value set (autocomplete)
    Values(BTreeSet<String>),
}

impl FacetOutput {
    /// True when there is nothing to report
    pub fn is_empty(&self) -> bool {
        match self {
            FacetOutput::None => true,
            FacetOutput::Counts(map) => map.is_empty(),
            FacetOutput::ByField(map) => map.is_empty(),
            FacetOutput::Values(set) => set.is_empty(),
        }
    }
}
