//! Highlight snippets
//!
//! A [`HighlightMap`] maps field names to the ordered snippets the engine
//! produced for one entity. Insertion order of fields and snippet order are
//! both preserved; nothing is re-sorted.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Opening emphasis marker placed around matched text
pub const EMPHASIS_OPEN: &str = "<em>";
/// Closing emphasis marker placed around matched text
pub const EMPHASIS_CLOSE: &str = "</em>";

/// Ordered field name → snippet list map
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HighlightMap {
    entries: Vec<(String, Vec<String>)>,
}

impl HighlightMap {
    /// Create an empty map
    pub fn new() -> Self {
        HighlightMap { entries: vec![] }
    }

    /// Set the snippets for a field
    ///
    /// A field that is already present keeps its position and has its
    /// snippets replaced.
    pub fn insert(&mut self, field: impl Into<String>, snippets: Vec<String>) {
        let field = field.into();
        match self.entries.iter_mut().find(|(f, _)| *f == field) {
            Some((_, existing)) => *existing = snippets,
            None => self.entries.push((field, snippets)),
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, field: impl Into<String>, snippets: Vec<String>) -> Self {
        self.insert(field, snippets);
        self
    }

    /// Snippets for a field
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, s)| s.as_slice())
    }

    /// Whether the field has an entry
    pub fn contains_field(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Field names in insertion order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(f, _)| f.as_str())
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(f, s)| (f.as_str(), s.as_slice()))
    }

    /// Copy of this map keeping only the fields accepted by `keep`
    pub fn filtered<F>(&self, mut keep: F) -> HighlightMap
    where
        F: FnMut(&str) -> bool,
    {
        HighlightMap {
            entries: self
                .entries
                .iter()
                .filter(|(f, _)| keep(f))
                .cloned()
                .collect(),
        }
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no field has snippets
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Vec<String>)> for HighlightMap {
    fn from_iter<I: IntoIterator<Item = (K, Vec<String>)>>(iter: I) -> Self {
        let mut map = HighlightMap::new();
        for (field, snippets) in iter {
            map.insert(field, snippets);
        }
        map
    }
}

impl Serialize for HighlightMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, snippets) in &self.entries {
            map.serialize_entry(field, snippets)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HighlightMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct HighlightVisitor;

        impl<'de> Visitor<'de> for HighlightVisitor {
            type Value = HighlightMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of field names to snippet lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<HighlightMap, A::Error> {
                let mut map = HighlightMap::new();
                while let Some((field, snippets)) = access.next_entry::<String, Vec<String>>()? {
                    map.insert(field, snippets);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(HighlightVisitor)
    }
}
