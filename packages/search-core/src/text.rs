//! Whitespace collapsing and locale-aware lowercasing.

use unicode_normalization::UnicodeNormalization;

/// Applies `normalize` then `lowercase`, in the order every caller (crawler
/// and query server alike) must use so indexing and querying agree on the
/// same term.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    locale: String,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new("ru_RU.UTF-8")
    }
}

impl TextNormalizer {
    pub fn new(locale: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Replaces `\n`, `\r`, `\t` with space, collapses runs of spaces to
    /// one, and trims leading/trailing space. Idempotent:
    /// `normalize(normalize(x)) == normalize(x)`.
    pub fn normalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last_was_space = false;
        for ch in text.chars() {
            let ch = match ch {
                '\n' | '\r' | '\t' => ' ',
                other => other,
            };
            if ch == ' ' {
                if last_was_space {
                    continue;
                }
                last_was_space = true;
            } else {
                last_was_space = false;
            }
            out.push(ch);
        }
        out.trim().to_string()
    }

    /// Locale-aware case folding over UTF-8. The locale is a
    /// construction-time option; in practice Rust's Unicode-aware
    /// `to_lowercase` already covers the Cyrillic default locale, so the
    /// stored `locale` only documents intent. Idempotent.
    pub fn lowercase(&self, text: &str) -> String {
        text.nfc().collect::<String>().to_lowercase()
    }

    /// Convenience: `lowercase(normalize(text))`, the sequence every
    /// indexing and query path must apply.
    pub fn normalize_and_lowercase(&self, text: &str) -> String {
        self.lowercase(&self.normalize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_trims() {
        let n = TextNormalizer::default();
        assert_eq!(n.normalize("  hello\n\tworld  \r\n"), "hello world");
    }

    #[test]
    fn normalize_is_idempotent() {
        let n = TextNormalizer::default();
        let once = n.normalize("a   b\tc");
        let twice = n.normalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn lowercase_is_idempotent() {
        let n = TextNormalizer::default();
        let once = n.lowercase("Кот HELLO");
        let twice = n.lowercase(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "кот hello");
    }

    #[test]
    fn lowercase_preserves_non_alpha() {
        let n = TextNormalizer::default();
        assert_eq!(n.lowercase("Hello, World!"), "hello, world!");
    }
}
