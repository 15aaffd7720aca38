//! Boolean criteria trees
//!
//! A [`Criteria`] is the backend-neutral query handed to a
//! [`QueryExecutor`](crate::QueryExecutor). The same tree drives the
//! index-engine executor and the SQL-style executor.
//!
//! # Invariants
//!
//! - Every `And`/`Or` node has at least one child. The [`Criteria::and`] and
//!   [`Criteria::or`] constructors enforce this: no children collapse to
//!   [`Criteria::MatchAll`], one child collapses to the child itself.
//! - Every `Term` names exactly one field.
//! - Boost only affects ranking weight, never whether a document matches.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// How a term value is compared to a field value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Field contains the value (case-insensitive substring)
    #[default]
    Contains,
    /// Field equals the value exactly
    Equals,
    /// Field contains a word within a small edit distance of the value
    Fuzzy,
}

/// How per-token groups are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combination {
    /// Every token must match some field (AND across tokens)
    #[default]
    All,
    /// Any token may match (OR across tokens)
    Any,
}

/// A single field predicate
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Term {
    /// Field the predicate applies to
    pub field: String,
    /// Value to compare against
    pub value: String,
    /// Comparison semantics
    pub mode: MatchMode,
    /// Optional ranking weight (1 when absent)
    pub boost: Option<u32>,
}

impl Term {
    /// Effective boost weight
    pub fn weight(&self) -> u32 {
        self.boost.unwrap_or(1)
    }
}

/// Boolean criteria expression
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criteria {
    /// Unrestricted criteria, matches every document
    MatchAll,
    /// Field predicate
    Term(Term),
    /// All children must match
    And(Vec<Criteria>),
    /// At least one child must match
    Or(Vec<Criteria>),
}

impl Criteria {
    /// Build a term predicate
    pub fn term(
        field: impl Into<String>,
        value: impl Into<String>,
        mode: MatchMode,
        boost: Option<u32>,
    ) -> Self {
        Criteria::Term(Term {
            field: field.into(),
            value: value.into(),
            mode,
            boost,
        })
    }

    /// Case-insensitive "contains" predicate
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::term(field, value, MatchMode::Contains, None)
    }

    /// Exact equality predicate
    pub fn equals(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::term(field, value, MatchMode::Equals, None)
    }

    /// Conjunction; collapses trivially small child lists
    ///
    /// `MatchAll` children are dropped since they do not restrict anything.
    pub fn and(children: Vec<Criteria>) -> Self {
        let mut children: Vec<Criteria> = children
            .into_iter()
            .filter(|c| !c.is_match_all())
            .collect();
        match children.len() {
            0 => Criteria::MatchAll,
            1 => children.remove(0),
            _ => Criteria::And(children),
        }
    }

    /// Disjunction; collapses trivially small child lists
    ///
    /// A `MatchAll` child makes the whole disjunction unrestricted.
    pub fn or(mut children: Vec<Criteria>) -> Self {
        if children.iter().any(Criteria::is_match_all) {
            return Criteria::MatchAll;
        }
        match children.len() {
            0 => Criteria::MatchAll,
            1 => children.remove(0),
            _ => Criteria::Or(children),
        }
    }

    /// True for the unrestricted criteria
    pub fn is_match_all(&self) -> bool {
        matches!(self, Criteria::MatchAll)
    }

    /// All term predicates in the tree, depth-first
    pub fn terms(&self) -> Vec<&Term> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a Term>) {
        match self {
            Criteria::MatchAll => {}
            Criteria::Term(term) => out.push(term),
            Criteria::And(children) | Criteria::Or(children) => {
                for child in children {
                    child.collect_terms(out);
                }
            }
        }
    }

    /// Distinct field names referenced by the tree
    pub fn fields(&self) -> BTreeSet<&str> {
        self.terms().into_iter().map(|t| t.field.as_str()).collect()
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            MatchMode::Contains => write!(f, "{}:*{}*", self.field, self.value)?,
            MatchMode::Equals => write!(f, "{}:\"{}\"", self.field, self.value)?,
            MatchMode::Fuzzy => write!(f, "{}:{}~", self.field, self.value)?,
        }
        if let Some(boost) = self.boost {
            write!(f, "^{}", boost)?;
        }
        Ok(())
    }
}

impl fmt::Display for Criteria {
    /// Lucene-like rendering, for logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criteria::MatchAll => write!(f, "*:*"),
            Criteria::Term(term) => write!(f, "{}", term),
            Criteria::And(children) => write_joined(f, children, " AND "),
            Criteria::Or(children) => write_joined(f, children, " OR "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, children: &[Criteria], sep: &str) -> fmt::Result {
    for (i, child) in children.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        match child {
            Criteria::And(_) | Criteria::Or(_) => write!(f, "({})", child)?,
            _ => write!(f, "{}", child)?,
        }
    }
    Ok(())
}
