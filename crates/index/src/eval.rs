//! Criteria evaluation against raw documents
//!
//! Both executors evaluate the same [`Criteria`] tree; they differ only in
//! how `Fuzzy` terms are interpreted ([`FuzzyPolicy`]) and in whether the
//! returned score is used for ranking.

use crate::text::{contains_ci, fuzzy_spans};
use catalog_core::{Criteria, MatchMode, RawDocument, Term};

/// How `MatchMode::Fuzzy` terms are evaluated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FuzzyPolicy {
    /// A word of the field is within a length-dependent edit distance
    EditDistance,
    /// Degrade to a case-insensitive substring match
    Substring,
}

/// Score of a document, or `None` if it does not match
///
/// The score is the sum of the weights of all matched terms. `MatchAll`
/// scores zero; an `Or` sums the children that match.
pub fn score(criteria: &Criteria, doc: &RawDocument, fuzzy: FuzzyPolicy) -> Option<u32> {
    match criteria {
        Criteria::MatchAll => Some(0),
        Criteria::Term(term) => term_matches(term, doc, fuzzy).then(|| term.weight()),
        Criteria::And(children) => children.iter().try_fold(0u32, |total, child| {
            score(child, doc, fuzzy).map(|s| total.saturating_add(s))
        }),
        Criteria::Or(children) => children
            .iter()
            .filter_map(|child| score(child, doc, fuzzy))
            .reduce(u32::saturating_add),
    }
}

/// Whether a document matches
pub fn matches(criteria: &Criteria, doc: &RawDocument, fuzzy: FuzzyPolicy) -> bool {
    score(criteria, doc, fuzzy).is_some()
}

/// Whether one term matches any value of its field
pub fn term_matches(term: &Term, doc: &RawDocument, fuzzy: FuzzyPolicy) -> bool {
    let values = doc.text_values(&term.field);
    match (term.mode, fuzzy) {
        (MatchMode::Equals, _) => values.iter().any(|v| *v == term.value),
        (MatchMode::Contains, _) | (MatchMode::Fuzzy, FuzzyPolicy::Substring) => {
            values.iter().any(|v| contains_ci(v, &term.value))
        }
        (MatchMode::Fuzzy, FuzzyPolicy::EditDistance) => {
            values.iter().any(|v| !fuzzy_spans(v, &term.value).is_empty())
        }
    }
}
