//! Whitespace tokenization and frequency aggregation.

use std::collections::HashMap;

const MIN_TOKEN_LEN: usize = 3;
const MAX_TOKEN_LEN: usize = 32;

/// Splits already-normalized text into tokens: split on ASCII whitespace,
/// strip Unicode punctuation from each raw token, discard tokens outside
/// `3..=32` codepoints. Preserves input order and duplicates.
pub fn tokenize(normalized_text: &str) -> Vec<String> {
    normalized_text
        .split_ascii_whitespace()
        .map(strip_punctuation)
        .filter(|token| {
            let len = token.chars().count();
            len >= MIN_TOKEN_LEN && len <= MAX_TOKEN_LEN
        })
        .collect()
}

fn strip_punctuation(raw: &str) -> String {
    raw.chars().filter(|c| !is_punctuation(*c)).collect()
}

/// Unicode punctuation classification covering ASCII plus the ranges
/// actually reachable from crawled web text (Latin-1 supplement
/// punctuation, general punctuation block, CJK/fullwidth punctuation).
fn is_punctuation(c: char) -> bool {
    c.is_ascii_punctuation()
        || matches!(c,
            '\u{00A1}' | '\u{00AB}' | '\u{00B7}' | '\u{00BB}' | '\u{00BF}'
            | '\u{2010}'..='\u{2027}'
            | '\u{2030}'..='\u{205E}'
            | '\u{3000}'..='\u{303F}'
            | '\u{FF00}'..='\u{FF0F}'
            | '\u{FF1A}'..='\u{FF20}'
            | '\u{FF3B}'..='\u{FF40}'
            | '\u{FF5B}'..='\u{FF65}'
        )
}

/// `tokenize(text)` folded into a counting map. Map order is irrelevant.
pub fn analyze_word_frequency(text: &str) -> HashMap<String, i64> {
    let mut freq = HashMap::new();
    for token in tokenize(text) {
        *freq.entry(token).or_insert(0) += 1;
    }
    freq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_and_filters_by_length() {
        let tokens = tokenize("hi hello hippopotamus a bb ccc");
        assert_eq!(tokens, vec!["hello", "hippopotamus", "ccc"]);
    }

    #[test]
    fn strips_punctuation() {
        let tokens = tokenize("hello, world! \"quoted\" (parens)");
        assert_eq!(tokens, vec!["hello", "world", "quoted", "parens"]);
    }

    #[test]
    fn preserves_order_and_duplicates() {
        let tokens = tokenize("cat dog cat bird dog");
        assert_eq!(tokens, vec!["cat", "dog", "cat", "bird", "dog"]);
    }

    #[test]
    fn analyze_word_frequency_counts() {
        let freq = analyze_word_frequency("hello hello world");
        assert_eq!(freq.get("hello"), Some(&2));
        assert_eq!(freq.get("world"), Some(&1));
    }

    #[test]
    fn rejects_tokens_longer_than_32_codepoints() {
        let long = "a".repeat(33);
        let tokens = tokenize(&long);
        assert!(tokens.is_empty());
    }

    #[test]
    fn empty_text_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(analyze_word_frequency("").is_empty());
    }
}
