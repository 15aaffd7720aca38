//! Result projection
//!
//! Maps a [`RawDocument`] plus its highlight fragments into a typed view.
//! Fields are copied 1:1 by name; the view decides which names it accepts
//! via [`SearchView::FIELDS`]. Highlights for fields outside the view are
//! dropped, and a document without highlights gets an empty map.

use catalog_core::{Error, HighlightMap, RawDocument, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A response shape that raw documents can be projected into
///
/// # Example
///
/// ```
/// use catalog_search::SearchView;
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct CategoryView {
///     id: String,
///     title: String,
///     description: Option<String>,
/// }
///
/// impl SearchView for CategoryView {
///     const FIELDS: &'static [&'static str] = &["id", "title", "description"];
/// }
/// ```
pub trait SearchView: DeserializeOwned {
    /// Field names the view is built from (`id` resolves to the document id)
    const FIELDS: &'static [&'static str];
}

/// A projected view with its highlight map attached
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projected<V> {
    /// Identifier of the source document
    pub id: String,
    /// The view itself
    pub view: V,
    /// Highlights restricted to the view's fields, order preserved
    pub highlights: HighlightMap,
}

/// Project one raw document into `V`
///
/// # Errors
///
/// Returns `Error::Conversion` when a document field cannot be converted to
/// the view's field type, or a required view field is missing.
pub fn project<V: SearchView>(
    document: &RawDocument,
    highlights: Option<&HighlightMap>,
) -> Result<Projected<V>> {
    let mut fields = Map::new();
    for name in V::FIELDS {
        if let Some(value) = document.field(name) {
            fields.insert((*name).to_string(), value);
        }
    }

    let view: V = serde_json::from_value(Value::Object(fields))
        .map_err(|e| Error::conversion(&document.id, e.to_string()))?;

    let highlights = highlights
        .map(|map| map.filtered(|field| V::FIELDS.iter().any(|f| *f == field)))
        .unwrap_or_default();

    Ok(Projected {
        id: document.id.clone(),
        view,
        highlights,
    })
}

/// Project a page of raw documents, failing on the first conversion error
pub fn project_all<'a, V, I, F>(documents: I, mut highlights_for: F) -> Result<Vec<Projected<V>>>
where
    V: SearchView,
    I: IntoIterator<Item = &'a RawDocument>,
    F: FnMut(&str) -> Option<&'a HighlightMap>,
{
    documents
        .into_iter()
        .map(|doc| project(doc, highlights_for(&doc.id)))
        .collect()
}
