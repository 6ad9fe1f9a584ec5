//! `SearchQuery` value object: 1..=4 non-empty, punctuation-stripped terms.

use crate::errors::ValidationError;

pub const MAX_TERMS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQueryValue {
    original: String,
    terms: Vec<String>,
}

impl SearchQueryValue {
    /// Strips punctuation per token, splits on whitespace, keeps non-empty
    /// tokens, and requires `1..=4` of them.
    pub fn parse(query: &str) -> Result<Self, ValidationError> {
        let terms: Vec<String> = query
            .split_whitespace()
            .map(strip_punctuation)
            .filter(|t| !t.is_empty())
            .collect();

        if terms.is_empty() || terms.len() > MAX_TERMS {
            return Err(ValidationError::InvalidQuery(query.to_string()));
        }

        Ok(Self {
            original: query.to_string(),
            terms,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}

fn strip_punctuation(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_ascii_punctuation()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_up_to_four_terms() {
        let q = SearchQueryValue::parse("cat dog bird fish").unwrap();
        assert_eq!(q.terms(), &["cat", "dog", "bird", "fish"]);
    }

    #[test]
    fn rejects_five_terms() {
        assert!(SearchQueryValue::parse("a b c d e").is_err());
    }

    #[test]
    fn rejects_punctuation_only_query() {
        assert!(SearchQueryValue::parse("...").is_err());
    }

    #[test]
    fn strips_trailing_punctuation_per_term() {
        let q = SearchQueryValue::parse("cat, dog!").unwrap();
        assert_eq!(q.terms(), &["cat", "dog"]);
    }

    #[test]
    fn rejects_empty_query() {
        assert!(SearchQueryValue::parse("").is_err());
        assert!(SearchQueryValue::parse("   ").is_err());
    }
}
