//! Raw result entities
//!
//! A [`RawDocument`] is what the index engine hands back: an identifier plus
//! a bag of named JSON values. Views are projected from it by field name.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Pseudo-field name under which the document identifier is exposed to views
pub const ID_FIELD: &str = "id";

/// A raw entity as stored in, and returned by, a query executor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Unique identifier (also the key for highlight maps)
    pub id: String,
    /// Named field values
    #[serde(default)]
    pub fields: Map<String, Value>,
}

impl RawDocument {
    /// Create a document with no fields
    pub fn new(id: impl Into<String>) -> Self {
        RawDocument {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder: set a field value
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Raw value of a field; `id` resolves to the identifier
    pub fn field(&self, name: &str) -> Option<Value> {
        if name == ID_FIELD && !self.fields.contains_key(ID_FIELD) {
            return Some(Value::String(self.id.clone()));
        }
        self.fields.get(name).cloned()
    }

    /// Textual values of a field
    ///
    /// Arrays are flattened one level; numbers and booleans are rendered
    /// with `to_string`; nulls and nested objects are skipped.
    pub fn text_values(&self, name: &str) -> Vec<String> {
        match self.field(name) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(value) => scalar_text(&value).into_iter().collect(),
            None => vec![],
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
