//! Search term normalization
//!
//! Turns raw user input into an ordered list of [`SearchToken`]s:
//! - Split on whitespace
//! - Strip ASCII punctuation from each piece
//! - Drop pieces that end up empty
//!
//! Order is preserved and duplicates are kept. Case is left alone; matching
//! semantics belong to the executor.

use serde::Serialize;
use std::fmt;

/// A non-empty, punctuation-free search token
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct SearchToken(String);

impl SearchToken {
    /// Sanitize one whitespace-free piece of input
    ///
    /// Returns `None` if nothing is left after stripping punctuation.
    pub fn new(piece: &str) -> Option<Self> {
        let stripped: String = piece.chars().filter(|c| !is_punctuation(*c)).collect();
        if stripped.is_empty() {
            None
        } else {
            Some(SearchToken(stripped))
        }
    }

    /// Token text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the token text
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for SearchToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The punctuation class stripped from tokens (`!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~`)
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
}

/// Tokenize text into search tokens
///
/// # Example
///
/// ```
/// use catalog_search::tokenizer::tokenize;
///
/// let tokens = tokenize("Secret, island! -- Planet");
/// let texts: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
/// assert_eq!(texts, vec!["Secret", "island", "Planet"]);
/// ```
pub fn tokenize(text: &str) -> Vec<SearchToken> {
    text.split_whitespace().filter_map(SearchToken::new).collect()
}

/// Tokenize possibly-absent input
///
/// `normalize(None)` and `normalize(Some(""))` both yield no tokens.
pub fn normalize(raw: Option<&str>) -> Vec<SearchToken> {
    raw.map(tokenize).unwrap_or_default()
}

/// Token texts joined by single spaces
pub fn join(tokens: &[SearchToken]) -> String {
    tokens
        .iter()
        .map(SearchToken::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn texts(tokens: &[SearchToken]) -> Vec<&str> {
        tokens.iter().map(SearchToken::as_str).collect()
    }

    #[test]
    fn test_tokenize_basic() {
        let tokens = tokenize("Island Planet");
        assert_eq!(texts(&tokens), vec!["Island", "Planet"]);
    }

    #[test]
    fn test_tokenize_strips_punctuation() {
        let tokens = tokenize("cookies, (baked) on-island!");
        assert_eq!(texts(&tokens), vec!["cookies", "baked", "onisland"]);
    }

    #[test]
    fn test_tokenize_drops_punctuation_only_pieces() {
        let tokens = tokenize("... --- !!! cookies ???");
        assert_eq!(texts(&tokens), vec!["cookies"]);
    }

    #[test]
    fn test_tokenize_keeps_duplicates_and_order() {
        let tokens = tokenize("b a b");
        assert_eq!(texts(&tokens), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_tokenize_keeps_unicode_letters() {
        let tokens = tokenize("crème brûlée");
        assert_eq!(texts(&tokens), vec!["crème", "brûlée"]);
    }

    #[test]
    fn test_tokenize_mixed_whitespace() {
        let tokens = tokenize("  one\ttwo\nthree  ");
        assert_eq!(texts(&tokens), vec!["one", "two", "three"]);
    }

    #[test]
    fn test_normalize_absent_and_empty() {
        assert!(normalize(None).is_empty());
        assert!(normalize(Some("")).is_empty());
        assert_eq!(normalize(None), normalize(Some("")));
        assert!(normalize(Some("   ")).is_empty());
    }

    #[test]
    fn test_join() {
        assert_eq!(join(&tokenize("choc, coo")), "choc coo");
        assert_eq!(join(&[]), "");
    }

    proptest! {
        #[test]
        fn prop_tokens_never_empty_or_punctuation_only(s in "\\PC*") {
            for token in normalize(Some(&s)) {
                prop_assert!(!token.as_str().is_empty());
                prop_assert!(!token.as_str().chars().all(|c| c.is_ascii_punctuation()));
                prop_assert!(!token.as_str().chars().any(|c| c.is_whitespace()));
            }
        }

        #[test]
        fn prop_tokenize_is_idempotent(s in "[a-zA-Z ,.!?-]{0,64}") {
            let once = join(&tokenize(&s));
            let twice = join(&tokenize(&once));
            prop_assert_eq!(once, twice);
        }
    }
}
