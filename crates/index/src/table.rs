//! Relational table backend
//!
//! Treats the document store as a single table and evaluates criteria the
//! way a SQL `WHERE` clause would: no ranking (rows come back in insertion
//! order), no highlighting, and `Fuzzy` terms degraded to a case-insensitive
//! `LIKE`. Facets are computed as `GROUP BY` counts over the matched rows.
//!
//! [`to_where_clause`] renders the same criteria as parameterized SQL so a
//! real database adapter can run it unchanged.

use crate::eval::{matches, FuzzyPolicy};
use crate::facet;
use crate::memory::DEADLINE_CHECK_INTERVAL;
use crate::store::DocumentStore;
use catalog_core::{
    Criteria, IndexQuery, MatchMode, QueryExecutor, RawDocument, RawResults, Result, Term,
};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Parameterized SQL fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlClause {
    /// SQL text with `?` placeholders
    pub sql: String,
    /// Bound values, in placeholder order
    pub params: Vec<String>,
}

impl fmt::Display for SqlClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.sql, self.params)
    }
}

/// Render criteria as a `WHERE` clause body
pub fn to_where_clause(criteria: &Criteria) -> SqlClause {
    let mut params = Vec::new();
    let sql = render(criteria, &mut params);
    SqlClause { sql, params }
}

fn render(criteria: &Criteria, params: &mut Vec<String>) -> String {
    match criteria {
        Criteria::MatchAll => "1 = 1".to_string(),
        Criteria::Term(term) => render_term(term, params),
        Criteria::And(children) => render_group(children, " AND ", params),
        Criteria::Or(children) => render_group(children, " OR ", params),
    }
}

fn render_group(children: &[Criteria], separator: &str, params: &mut Vec<String>) -> String {
    if children.is_empty() {
        return "1 = 1".to_string();
    }
    children
        .iter()
        .map(|child| match child {
            Criteria::And(_) | Criteria::Or(_) => format!("({})", render(child, params)),
            _ => render(child, params),
        })
        .collect::<Vec<_>>()
        .join(separator)
}

fn render_term(term: &Term, params: &mut Vec<String>) -> String {
    let column = quote_ident(&term.field);
    match term.mode {
        MatchMode::Equals => {
            params.push(term.value.clone());
            format!("{} = ?", column)
        }
        MatchMode::Contains | MatchMode::Fuzzy => {
            params.push(format!("%{}%", escape_like(&term.value)));
            format!("LOWER({}) LIKE LOWER(?) ESCAPE '\\'", column)
        }
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Unranked table executor over a [`DocumentStore`]
pub struct TableStore {
    store: Arc<DocumentStore>,
}

impl TableStore {
    /// Create an executor over a shared store
    pub fn new(store: Arc<DocumentStore>) -> Self {
        TableStore { store }
    }

    /// Create an executor over its own store holding `documents`
    pub fn from_documents(documents: impl IntoIterator<Item = RawDocument>) -> Self {
        Self::new(Arc::new(DocumentStore::with_documents(documents)))
    }

    /// The backing store
    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }
}

impl QueryExecutor for TableStore {
    fn execute(&self, query: &IndexQuery) -> Result<RawResults> {
        let started = Instant::now();
        let clause = to_where_clause(&query.criteria);
        debug!(sql = %clause.sql, params = ?clause.params, "Table query");

        let docs = self.store.read()?;
        let mut matched: Vec<&RawDocument> = Vec::new();
        for (position, doc) in docs.iter().enumerate() {
            if position % DEADLINE_CHECK_INTERVAL == 0 {
                query.check_deadline(started)?;
            }
            if matches(&query.criteria, doc, FuzzyPolicy::Substring) {
                matched.push(doc);
            }
        }
        query.check_deadline(started)?;

        let facet_pages = facet::count(&query.facet_fields, matched.iter().copied());
        let items: Vec<RawDocument> = matched
            .iter()
            .skip(usize::try_from(query.page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(query.page.limit()).unwrap_or(usize::MAX))
            .map(|doc| (*doc).clone())
            .collect();

        Ok(RawResults {
            items,
            total: matched.len() as u64,
            highlights: HashMap::new(),
            facet_pages,
        })
    }

    fn name(&self) -> &str {
        "table"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::OffsetPageRequest;
    use serde_json::json;

    #[test]
    fn test_where_clause_for_match_all() {
        let clause = to_where_clause(&Criteria::MatchAll);
        assert_eq!(clause.sql, "1 = 1");
        assert!(clause.params.is_empty());
    }

    #[test]
    fn test_where_clause_for_terms() {
        let clause = to_where_clause(&Criteria::equals("type", "category"));
        assert_eq!(clause.sql, "\"type\" = ?");
        assert_eq!(clause.params, vec!["category"]);

        let clause = to_where_clause(&Criteria::contains("title", "50%_off"));
        assert_eq!(clause.sql, "LOWER(\"title\") LIKE LOWER(?) ESCAPE '\\'");
        assert_eq!(clause.params, vec!["%50\\%\\_off%"]);
    }

    #[test]
    fn test_where_clause_nesting() {
        let criteria = Criteria::And(vec![
            Criteria::Or(vec![
                Criteria::contains("title", "island"),
                Criteria::contains("description", "island"),
            ]),
            Criteria::equals("type", "category"),
        ]);
        let clause = to_where_clause(&criteria);
        assert_eq!(
            clause.sql,
            "(LOWER(\"title\") LIKE LOWER(?) ESCAPE '\\' OR LOWER(\"description\") LIKE LOWER(?) ESCAPE '\\') AND \"type\" = ?"
        );
        assert_eq!(clause.params, vec!["%island%", "%island%", "category"]);
    }

    #[test]
    fn test_identifiers_are_quoted() {
        let clause = to_where_clause(&Criteria::equals("we\"ird", "x"));
        assert_eq!(clause.sql, "\"we\"\"ird\" = ?");
    }

    #[test]
    fn test_execute_keeps_insertion_order_without_highlights() {
        let table = TableStore::from_documents(vec![
            RawDocument::new("1").with_field("title", "Island Hopping"),
            RawDocument::new("2")
                .with_field("title", "Secret Island")
                .with_field("tags", json!(["island"])),
        ]);
        let criteria = Criteria::Or(vec![
            Criteria::contains("title", "island"),
            Criteria::term("tags", "island", MatchMode::Contains, Some(10)),
        ]);
        let query = IndexQuery::new(criteria, OffsetPageRequest::new(0, 10).unwrap())
            .with_highlights(vec!["title".into()])
            .with_facets(vec!["tags".into()]);
        let results = table.execute(&query).unwrap();

        let ids: Vec<&str> = results.items.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(results.total, 2);
        assert!(results.highlights.is_empty());
        assert_eq!(results.facet_pages[0].entries[0].value, "island");
    }

    #[test]
    fn test_huge_offset_gives_empty_page() {
        let table = TableStore::from_documents(vec![RawDocument::new("1"), RawDocument::new("2")]);
        let page = OffsetPageRequest::new(i64::MAX, i64::MAX).unwrap();
        let results = table
            .execute(&IndexQuery::new(Criteria::MatchAll, page))
            .unwrap();
        assert_eq!(results.total, 2);
        assert!(results.items.is_empty());
    }

    #[test]
    fn test_fuzzy_degrades_to_like() {
        let table = TableStore::from_documents(vec![
            RawDocument::new("1").with_field("name", "Chocolate Cookies")
        ]);
        let page = OffsetPageRequest::new(0, 10).unwrap();

        let partial = Criteria::term("name", "cook", MatchMode::Fuzzy, None);
        assert_eq!(table.execute(&IndexQuery::new(partial, page)).unwrap().total, 1);

        let typo = Criteria::term("name", "cokies", MatchMode::Fuzzy, None);
        assert_eq!(table.execute(&IndexQuery::new(typo, page)).unwrap().total, 0);
    }
}
