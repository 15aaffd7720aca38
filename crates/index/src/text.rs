//! Text matching primitives shared by the executors
//!
//! All offsets are byte offsets into the original text and always fall on
//! char boundaries.

/// Case-insensitive occurrences of `needle` in `haystack`, as byte ranges
///
/// Overlapping occurrences are not reported; scanning resumes after each
/// match.
pub fn find_ci(haystack: &str, needle: &str) -> Vec<(usize, usize)> {
    let needle: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return vec![];
    }

    let mut ranges = Vec::new();
    let mut resume_at = 0;
    for (start, _) in haystack.char_indices() {
        if start < resume_at {
            continue;
        }
        if let Some(end) = match_at(haystack, start, &needle) {
            ranges.push((start, end));
            resume_at = end;
        }
    }
    ranges
}

/// End offset if the lowercased needle matches `haystack` starting at `start`
fn match_at(haystack: &str, start: usize, needle: &[char]) -> Option<usize> {
    let mut pending = needle.iter();
    let mut expected = pending.next();
    for (offset, c) in haystack[start..].char_indices() {
        for lower in c.to_lowercase() {
            match expected {
                Some(e) if *e == lower => expected = pending.next(),
                _ => return None,
            }
        }
        if expected.is_none() {
            return Some(start + offset + c.len_utf8());
        }
    }
    None
}

/// Case-insensitive substring test
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    !find_ci(haystack, needle).is_empty()
}

/// Byte ranges of alphanumeric runs
pub fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut start = None;
    for (i, c) in text.char_indices() {
        if c.is_alphanumeric() {
            if start.is_none() {
                start = Some(i);
            }
        } else if let Some(s) = start.take() {
            spans.push((s, i));
        }
    }
    if let Some(s) = start {
        spans.push((s, text.len()));
    }
    spans
}

/// Edit distance allowed for a fuzzy term of `len` chars
pub fn max_edits(len: usize) -> usize {
    match len {
        0..=2 => 0,
        3..=5 => 1,
        _ => 2,
    }
}

/// Levenshtein distance over chars
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Words of `text` matched by the words of a fuzzy `term`, as byte ranges
///
/// Every word of `term` must be within [`max_edits`] of some word of
/// `text`; otherwise nothing matches and the result is empty. On a match
/// the spans of all matched text words are returned in text order.
pub fn fuzzy_spans(text: &str, term: &str) -> Vec<(usize, usize)> {
    let text_words: Vec<((usize, usize), String)> = word_spans(text)
        .into_iter()
        .map(|(s, e)| ((s, e), text[s..e].to_lowercase()))
        .collect();

    let mut spans = Vec::new();
    let mut any_term_word = false;
    for (s, e) in word_spans(term) {
        any_term_word = true;
        let word = term[s..e].to_lowercase();
        let allowed = max_edits(word.chars().count());
        let before = spans.len();
        spans.extend(
            text_words
                .iter()
                .filter(|(_, candidate)| levenshtein(candidate, &word) <= allowed)
                .map(|(span, _)| *span),
        );
        if spans.len() == before {
            return vec![];
        }
    }
    if !any_term_word {
        return vec![];
    }
    spans.sort_unstable();
    spans.dedup();
    spans
}

/// Sort and merge overlapping or touching ranges
pub fn merge_ranges(mut ranges: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    ranges.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(ranges.len());
    for (start, end) in ranges {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}
