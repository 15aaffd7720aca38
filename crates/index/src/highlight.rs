//! Highlight snippet generation
//!
//! Each value of a highlight field that contains matched text becomes one
//! snippet, with every matched range wrapped in `<em>…</em>`.
//!
//! - `Contains` and `Fuzzy` terms highlight in any requested field.
//! - `Equals` terms highlight only their own field, and only whole values.

use crate::text::{find_ci, fuzzy_spans, merge_ranges};
use catalog_core::{HighlightMap, MatchMode, RawDocument, Term, EMPHASIS_CLOSE, EMPHASIS_OPEN};

/// Highlight map for one document
///
/// Fields are visited in the order requested; fields without matches get
/// no entry.
pub fn highlight(doc: &RawDocument, fields: &[String], terms: &[&Term]) -> HighlightMap {
    let mut map = HighlightMap::new();
    for field in fields {
        let snippets: Vec<String> = doc
            .text_values(field)
            .iter()
            .filter_map(|value| snippet(field, value, terms))
            .collect();
        if !snippets.is_empty() {
            map.insert(field.clone(), snippets);
        }
    }
    map
}

fn snippet(field: &str, value: &str, terms: &[&Term]) -> Option<String> {
    let mut ranges = Vec::new();
    for term in terms {
        match term.mode {
            MatchMode::Contains => ranges.extend(find_ci(value, &term.value)),
            MatchMode::Fuzzy => ranges.extend(fuzzy_spans(value, &term.value)),
            MatchMode::Equals => {
                if term.field == field && term.value == value {
                    ranges.push((0, value.len()));
                }
            }
        }
    }
    if ranges.is_empty() {
        return None;
    }
    Some(emphasize(value, &merge_ranges(ranges)))
}

/// Wrap each (sorted, disjoint) range of `text` in emphasis markers
pub fn emphasize(text: &str, ranges: &[(usize, usize)]) -> String {
    let mut out = String::with_capacity(
        text.len() + ranges.len() * (EMPHASIS_OPEN.len() + EMPHASIS_CLOSE.len()),
    );
    let mut cursor = 0;
    for &(start, end) in ranges {
        out.push_str(&text[cursor..start]);
        out.push_str(EMPHASIS_OPEN);
        out.push_str(&text[start..end]);
        out.push_str(EMPHASIS_CLOSE);
        cursor = end;
    }
    out.push_str(&text[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::Criteria;
    use serde_json::json;

    fn cookies_doc() -> RawDocument {
        RawDocument::new("07")
            .with_field("type", "category")
            .with_field("title", "Secret Island")
            .with_field(
                "description",
                "Bake your own cookies, on a secret island!",
            )
    }

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_contains_snippet() {
        let criteria = Criteria::contains("description", "cookies");
        let map = highlight(&cookies_doc(), &fields(&["description"]), &criteria.terms());
        assert_eq!(
            map.get("description").unwrap(),
            ["Bake your own <em>cookies</em>, on a secret island!"]
        );
    }

    #[test]
    fn test_terms_highlight_across_fields_in_request_order() {
        let criteria = Criteria::contains("title", "island");
        let map = highlight(
            &cookies_doc(),
            &fields(&["title", "description"]),
            &criteria.terms(),
        );
        let order: Vec<&str> = map.fields().collect();
        assert_eq!(order, vec!["title", "description"]);
        assert_eq!(map.get("title").unwrap(), ["Secret <em>Island</em>"]);
        assert_eq!(
            map.get("description").unwrap(),
            ["Bake your own cookies, on a secret <em>island</em>!"]
        );
    }

    #[test]
    fn test_equals_only_highlights_own_field() {
        let criteria = Criteria::equals("type", "category");
        let map = highlight(
            &cookies_doc(),
            &fields(&["type", "description"]),
            &criteria.terms(),
        );
        assert_eq!(map.get("type").unwrap(), ["<em>category</em>"]);
        assert!(!map.contains_field("description"));
    }

    #[test]
    fn test_fuzzy_snippet() {
        let criteria = Criteria::term("title", "Islnd", MatchMode::Fuzzy, None);
        let map = highlight(&cookies_doc(), &fields(&["title"]), &criteria.terms());
        assert_eq!(map.get("title").unwrap(), ["Secret <em>Island</em>"]);
    }

    #[test]
    fn test_one_snippet_per_matching_value() {
        let doc = RawDocument::new("1").with_field("tags", json!(["island", "planet", "moon"]));
        let criteria = Criteria::Or(vec![
            Criteria::contains("tags", "island"),
            Criteria::contains("tags", "planet"),
        ]);
        let map = highlight(&doc, &fields(&["tags"]), &criteria.terms());
        assert_eq!(
            map.get("tags").unwrap(),
            ["<em>island</em>", "<em>planet</em>"]
        );
    }

    #[test]
    fn test_no_match_no_entry() {
        let criteria = Criteria::contains("title", "planet");
        let map = highlight(&cookies_doc(), &fields(&["title"]), &criteria.terms());
        assert!(map.is_empty());
    }

    #[test]
    fn test_emphasize_merged_ranges() {
        assert_eq!(emphasize("abcdef", &[(0, 2), (4, 6)]), "<em>ab</em>cd<em>ef</em>");
        assert_eq!(emphasize("abc", &[]), "abc");
    }
}
