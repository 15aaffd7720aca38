//! Shared fixtures for catalog-search integration tests.
//!
//! Import via `mod common;`.

#![allow(dead_code)]

pub use catalog_core::{
    BackendKind, CatalogConfig, Combination, Error, FacetOutput, OffsetPageRequest, RawDocument,
};
pub use catalog_index::{open_executor, DocumentStore};
pub use catalog_search::{CatalogSearch, Projected, SearchView};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CategoryView {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl SearchView for CategoryView {
    const FIELDS: &'static [&'static str] = &["id", "title", "description"];
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductView {
    pub id: String,
    pub sku: String,
    pub name: String,
}

impl SearchView for ProductView {
    const FIELDS: &'static [&'static str] = &["id", "sku", "name"];
}

// ============================================================================
// Documents
// ============================================================================

fn category(id: &str, title: &str, description: &str, tags: &[&str]) -> RawDocument {
    RawDocument::new(id)
        .with_field("type", "category")
        .with_field("title", title)
        .with_field("description", description)
        .with_field("tags", json!(tags))
}

fn product(id: &str, sku: &str, name: &str, description: &str, category: &str) -> RawDocument {
    RawDocument::new(id)
        .with_field("type", "product")
        .with_field("sku", sku)
        .with_field("name", name)
        .with_field("description", description)
        .with_field("category", category)
}

/// Ten categories, four of which mention "Island" or "Planet" in the title,
/// plus three products.
pub fn catalog_documents() -> Vec<RawDocument> {
    vec![
        category("01", "Island Adventures", "Tales from far shores", &["travel", "book"]),
        category("02", "Planet Express", "Delivery across the galaxy", &["space", "delivery"]),
        category("03", "Kitchen Basics", "Everyday recipes", &["cooking"]),
        category("04", "Board Games", "Fun for the family", &["games"]),
        category("05", "Garden Tools", "Dig and plant", &["garden"]),
        category("06", "Red Planet Guide", "Mars for beginners", &["space", "travel"]),
        category(
            "07",
            "Secret Island",
            "Bake your own cookies, on a secret island!",
            &["cookies", "cooking"],
        ),
        category("08", "Winter Sports", "Skiing and skating", &["sports"]),
        category("09", "Music Theory", "Scales and chords", &["music"]),
        category("10", "Ocean Life", "Fish and coral", &["nature"]),
        product("p1", "SKU-100", "Chocolate Cookies", "Rich and sweet", "snacks"),
        product("p2", "SKU-200", "Oat Cookies", "Crunchy", "snacks"),
        product("p3", "SKU-300", "Island Map", "Map of a secret island", "maps"),
    ]
}

pub const ISLAND_OR_PLANET: [&str; 4] = ["01", "02", "06", "07"];

// ============================================================================
// Setup
// ============================================================================

/// Default profiles on the given backend
pub fn test_config(backend: BackendKind) -> CatalogConfig {
    let mut config = CatalogConfig::from_toml_str(CatalogConfig::default_toml())
        .expect("default config parses");
    config.backend = backend;
    config
}

/// Same, with the category profile combining tokens with OR
pub fn any_config(backend: BackendKind) -> CatalogConfig {
    let mut config = test_config(backend);
    if let Some(profile) = config.profiles.get_mut("category") {
        profile.combination = Combination::Any;
    }
    config
}

/// Catalog search plus the store behind it
pub fn catalog_with(config: CatalogConfig) -> (CatalogSearch, Arc<DocumentStore>) {
    let store = Arc::new(DocumentStore::with_documents(catalog_documents()));
    let executor = open_executor(config.backend, store.clone());
    (CatalogSearch::new(executor, config), store)
}

pub fn page(offset: i64, limit: i64) -> OffsetPageRequest {
    OffsetPageRequest::new(offset, limit).expect("valid page")
}

pub fn ids<V>(items: &[Projected<V>]) -> Vec<&str> {
    items.iter().map(|item| item.id.as_str()).collect()
}
