//! Criteria construction
//!
//! Two query shapes are built here:
//!
//! ```text
//! for_tokens (tokenized, per-token OR across fields):
//!
//!   ( f1:*t1*^b1 OR f2:*t1* ) AND ( f1:*t2*^b1 OR f2:*t2* ) AND type:"T"
//!                             ^^^ OR when Combination::Any
//!
//! boosted_lookup (two fixed branches, no token loop):
//!
//!   ( exact:"term"^B OR fuzzy:term~ ) AND type:"T"
//! ```
//!
//! Both are pure and total. Zero tokens produce the type filter alone (or
//! `MatchAll` without a type); whether to run such a query is the caller's
//! decision.

use crate::tokenizer::SearchToken;
use catalog_core::{Combination, Criteria, LookupConfig, MatchMode, SearchOptions};
use std::collections::BTreeMap;

/// Builds criteria trees from tokens, fields, boosts and a type filter
#[derive(Debug, Clone)]
pub struct CriteriaBuilder<'a> {
    fields: &'a [String],
    boost: Option<&'a BTreeMap<String, u32>>,
    combination: Combination,
    type_filter: Option<Criteria>,
}

impl<'a> CriteriaBuilder<'a> {
    /// Builder over the given fields, no boosts, no type filter
    pub fn new(fields: &'a [String]) -> Self {
        CriteriaBuilder {
            fields,
            boost: None,
            combination: Combination::default(),
            type_filter: None,
        }
    }

    /// Builder configured from search options
    pub fn from_options(options: &'a SearchOptions) -> Self {
        CriteriaBuilder {
            fields: &options.fields,
            boost: Some(&options.boost),
            combination: options.combination,
            type_filter: options.type_filter(),
        }
    }

    /// Builder: restrict to different fields, keeping everything else
    pub fn on_fields(mut self, fields: &'a [String]) -> Self {
        self.fields = fields;
        self
    }

    /// Builder: set per-field boosts
    pub fn with_boosts(mut self, boost: &'a BTreeMap<String, u32>) -> Self {
        self.boost = Some(boost);
        self
    }

    /// Builder: set token combination
    pub fn with_combination(mut self, combination: Combination) -> Self {
        self.combination = combination;
        self
    }

    /// Builder: AND every query with `field == value`
    pub fn with_type_filter(mut self, field: &str, value: &str) -> Self {
        self.type_filter = Some(Criteria::equals(field, value));
        self
    }

    fn boost_for(&self, field: &str) -> Option<u32> {
        self.boost.and_then(|b| b.get(field).copied())
    }

    fn restrict(&self, criteria: Criteria) -> Criteria {
        match &self.type_filter {
            Some(filter) => Criteria::and(vec![criteria, filter.clone()]),
            None => criteria,
        }
    }

    /// Criteria that only applies the type filter
    pub fn type_only(&self) -> Criteria {
        self.restrict(Criteria::MatchAll)
    }

    /// Per-token OR across fields, combined across tokens
    ///
    /// With no tokens or no fields this is [`type_only`](Self::type_only).
    pub fn for_tokens(&self, tokens: &[SearchToken]) -> Criteria {
        if tokens.is_empty() || self.fields.is_empty() {
            return self.type_only();
        }

        let groups: Vec<Criteria> = tokens
            .iter()
            .map(|token| {
                Criteria::or(
                    self.fields
                        .iter()
                        .map(|field| {
                            Criteria::term(
                                field,
                                token.as_str(),
                                MatchMode::Contains,
                                self.boost_for(field),
                            )
                        })
                        .collect(),
                )
            })
            .collect();

        let combined = match self.combination {
            Combination::All => Criteria::and(groups),
            Combination::Any => Criteria::or(groups),
        };
        self.restrict(combined)
    }

    /// One exact term on one field, input not tokenized
    ///
    /// A blank term yields [`type_only`](Self::type_only).
    pub fn exact_term(&self, field: &str, term: &str) -> Criteria {
        let term = term.trim();
        if term.is_empty() {
            return self.type_only();
        }
        self.restrict(Criteria::term(
            field,
            term,
            MatchMode::Equals,
            self.boost_for(field),
        ))
    }

    /// Exact match on one field (boosted) OR fuzzy match on another
    ///
    /// A blank term yields [`type_only`](Self::type_only).
    pub fn boosted_lookup(&self, term: &str, lookup: &LookupConfig) -> Criteria {
        let term = term.trim();
        if term.is_empty() {
            return self.type_only();
        }
        self.restrict(Criteria::or(vec![
            Criteria::term(
                &lookup.exact_field,
                term,
                MatchMode::Equals,
                Some(lookup.exact_boost),
            ),
            Criteria::term(&lookup.fuzzy_field, term, MatchMode::Fuzzy, None),
        ]))
    }
}
