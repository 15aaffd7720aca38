//! Search configuration via `catalog.toml`
//!
//! Each searchable entity type gets a `[profiles.<name>]` table naming its
//! type discriminator, searchable fields, boosts, facets and highlights.
//! Per-request [`SearchOptions`] are derived from a profile, so endpoints
//! are parameterized by configuration values rather than by type.

use crate::criteria::{Combination, Criteria};
use crate::error::{Error, Result};
use crate::facet::FacetMode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "catalog.toml";

/// Default name of the type discriminator field
pub const DEFAULT_TYPE_FIELD: &str = "type";

// ============================================================================
// SearchOptions
// ============================================================================

/// What a search does when the input normalizes to zero tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyInputPolicy {
    /// Ignore the search and return every document of the configured type
    #[default]
    MatchAllOfType,
    /// Return an explicitly empty result
    EmptyResult,
}

/// Per-request search configuration
///
/// # Example
///
/// ```
/// use catalog_core::SearchOptions;
///
/// let options = SearchOptions::new("category")
///     .with_fields(vec!["title".into(), "description".into()])
///     .with_boost("title", 3);
///
/// assert_eq!(options.boost_for("title"), Some(3));
/// assert_eq!(options.boost_for("description"), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    /// Fields searched for each token
    pub fields: Vec<String>,
    /// Fields to facet on
    pub facet_fields: Vec<String>,
    /// Fields to highlight
    pub highlight_fields: Vec<String>,
    /// Ranking weight per field
    pub boost: BTreeMap<String, u32>,
    /// Value of the type discriminator to restrict to
    pub document_type: String,
    /// Name of the type discriminator field
    pub type_field: String,
    /// AND or OR across tokens
    pub combination: Combination,
    /// Behaviour on blank input
    pub empty_input: EmptyInputPolicy,
    /// Facet shape to assemble
    pub facet_mode: FacetMode,
    /// Time allowed for the executor call
    pub timeout: Option<Duration>,
}

impl SearchOptions {
    /// Create options for a document type with no fields configured
    pub fn new(document_type: impl Into<String>) -> Self {
        SearchOptions {
            fields: vec![],
            facet_fields: vec![],
            highlight_fields: vec![],
            boost: BTreeMap::new(),
            document_type: document_type.into(),
            type_field: DEFAULT_TYPE_FIELD.to_string(),
            combination: Combination::default(),
            empty_input: EmptyInputPolicy::default(),
            facet_mode: FacetMode::default(),
            timeout: None,
        }
    }

    /// Builder: set searched fields
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Builder: set facet fields
    pub fn with_facet_fields(mut self, fields: Vec<String>) -> Self {
        self.facet_fields = fields;
        self
    }

    /// Builder: set highlight fields
    pub fn with_highlight_fields(mut self, fields: Vec<String>) -> Self {
        self.highlight_fields = fields;
        self
    }

    /// Builder: set the boost for one field
    pub fn with_boost(mut self, field: impl Into<String>, boost: u32) -> Self {
        self.boost.insert(field.into(), boost);
        self
    }

    /// Builder: set the type discriminator field name
    pub fn with_type_field(mut self, field: impl Into<String>) -> Self {
        self.type_field = field.into();
        self
    }

    /// Builder: set token combination
    pub fn with_combination(mut self, combination: Combination) -> Self {
        self.combination = combination;
        self
    }

    /// Builder: set blank-input behaviour
    pub fn with_empty_input(mut self, policy: EmptyInputPolicy) -> Self {
        self.empty_input = policy;
        self
    }

    /// Builder: set facet shape
    pub fn with_facet_mode(mut self, mode: FacetMode) -> Self {
        self.facet_mode = mode;
        self
    }

    /// Builder: set executor timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Boost configured for a field
    pub fn boost_for(&self, field: &str) -> Option<u32> {
        self.boost.get(field).copied()
    }

    /// Equality filter on the type discriminator
    ///
    /// `None` when no document type is configured.
    pub fn type_filter(&self) -> Option<Criteria> {
        if self.document_type.is_empty() {
            None
        } else {
            Some(Criteria::equals(&self.type_field, &self.document_type))
        }
    }
}

// ============================================================================
// catalog.toml
// ============================================================================

/// Which [`QueryExecutor`](crate::QueryExecutor) implementation to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Index-engine executor (ranking, fuzzy match, highlights)
    #[default]
    Index,
    /// SQL-style table executor (no ranking, no highlights)
    Table,
}

/// Two-branch boosted lookup: exact on one field OR fuzzy on another
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupConfig {
    /// Field matched exactly, with `exact_boost`
    pub exact_field: String,
    /// Field matched fuzzily
    pub fuzzy_field: String,
    /// Ranking weight of the exact branch
    #[serde(default = "default_exact_boost")]
    pub exact_boost: u32,
}

fn default_exact_boost() -> u32 {
    10
}

/// Search profile for one entity type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogProfile {
    /// Type discriminator value
    pub document_type: String,
    /// Fields searched by tokenized search
    #[serde(default)]
    pub fields: Vec<String>,
    /// Field used by by-name operations
    #[serde(default = "default_name_field")]
    pub name_field: String,
    /// Field used by by-title operations
    #[serde(default = "default_title_field")]
    pub title_field: String,
    /// Fields to facet on
    #[serde(default)]
    pub facet_fields: Vec<String>,
    /// Fields to highlight
    #[serde(default)]
    pub highlight_fields: Vec<String>,
    /// Ranking weight per field
    #[serde(default)]
    pub boost: BTreeMap<String, u32>,
    /// Field whose facet values feed autocomplete
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggest_field: Option<String>,
    /// AND or OR across tokens
    #[serde(default)]
    pub combination: Combination,
    /// Facet shape to assemble
    #[serde(default)]
    pub facet_mode: FacetMode,
    /// Find-by-query lookup
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<LookupConfig>,
}

fn default_name_field() -> String {
    "name".to_string()
}

fn default_title_field() -> String {
    "title".to_string()
}

impl CatalogProfile {
    /// Derive per-request options from this profile
    pub fn search_options(&self, config: &CatalogConfig) -> SearchOptions {
        SearchOptions {
            fields: self.fields.clone(),
            facet_fields: self.facet_fields.clone(),
            highlight_fields: self.highlight_fields.clone(),
            boost: self.boost.clone(),
            document_type: self.document_type.clone(),
            type_field: config.type_field.clone(),
            combination: self.combination,
            empty_input: EmptyInputPolicy::MatchAllOfType,
            facet_mode: self.facet_mode,
            timeout: config.timeout(),
        }
    }
}

/// Catalog search configuration loaded from `catalog.toml`
///
/// # Example
///
/// ```toml
/// backend = "index"
/// type_field = "type"
///
/// [profiles.category]
/// document_type = "category"
/// fields = ["title", "description"]
/// boost = { title = 3 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Executor backend
    #[serde(default)]
    pub backend: BackendKind,
    /// Name of the type discriminator field
    #[serde(default = "default_type_field")]
    pub type_field: String,
    /// Executor timeout in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
    /// Search profiles by name
    #[serde(default)]
    pub profiles: BTreeMap<String, CatalogProfile>,
}

fn default_type_field() -> String {
    DEFAULT_TYPE_FIELD.to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            backend: BackendKind::default(),
            type_field: default_type_field(),
            timeout_ms: None,
            profiles: BTreeMap::new(),
        }
    }
}

impl CatalogConfig {
    /// Executor timeout as a `Duration`
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }

    /// Look up a profile by name
    pub fn profile(&self, name: &str) -> Result<&CatalogProfile> {
        self.profiles
            .get(name)
            .ok_or_else(|| Error::invalid_argument(format!("unknown search profile '{}'", name)))
    }

    /// Check profile invariants
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if a profile has an empty `document_type`,
    /// no searchable `fields`, a zero boost, or a zero lookup boost.
    pub fn validate(&self) -> Result<()> {
        if self.type_field.is_empty() {
            return Err(Error::config("type_field must not be empty"));
        }
        for (name, profile) in &self.profiles {
            if profile.document_type.is_empty() {
                return Err(Error::config(format!(
                    "profile '{}' has an empty document_type",
                    name
                )));
            }
            if profile.fields.is_empty() {
                return Err(Error::config(format!(
                    "profile '{}' must list at least one searchable field",
                    name
                )));
            }
            if let Some((field, _)) = profile.boost.iter().find(|(_, b)| **b == 0) {
                return Err(Error::config(format!(
                    "profile '{}' boost for '{}' must be greater than zero",
                    name, field
                )));
            }
            if let Some(lookup) = &profile.lookup {
                if lookup.exact_boost == 0 {
                    return Err(Error::config(format!(
                        "profile '{}' lookup.exact_boost must be greater than zero",
                        name
                    )));
                }
            }
        }
        Ok(())
    }

    /// Parse and validate config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CatalogConfig = toml::from_str(content)
            .map_err(|e| Error::config(format!("failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate config from a file path
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config = Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { reason } => {
                Error::config(format!("{} (in '{}')", reason, path.display()))
            }
            other => other,
        })?;
        info!(
            path = %path.display(),
            backend = ?config.backend,
            profiles = config.profiles.len(),
            "Loaded catalog search config"
        );
        Ok(config)
    }

    /// Write the default config file if it does not already exist
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Default config file content with comments
    pub fn default_toml() -> &'static str {
        r#"# Catalog search configuration
#
# Executor backend: "index" (default) or "table"
#   "index" = index engine: boost ranking, fuzzy matching, highlights
#   "table" = SQL-style table scan: no ranking, no highlights
backend = "index"

# Field holding the entity type discriminator
type_field = "type"

# Executor timeout in milliseconds (optional)
# timeout_ms = 2000

[profiles.category]
document_type = "category"
fields = ["title", "description"]
title_field = "title"
facet_fields = ["tags"]
highlight_fields = ["title", "description"]
suggest_field = "tags"
boost = { title = 3 }

[profiles.product]
document_type = "product"
fields = ["name", "description"]
name_field = "name"
facet_fields = ["category"]
highlight_fields = ["description"]
boost = { name = 2 }

[profiles.product.lookup]
exact_field = "sku"
fuzzy_field = "name"
exact_boost = 10
"#
    }
}
