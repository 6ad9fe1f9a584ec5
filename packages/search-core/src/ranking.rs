//! Result ranking: descending relevance, ascending id tie-break.

/// Transient query output: `relevance = Σ frequency[w]` over query terms
/// present in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub document_id: i64,
    pub url: String,
    pub relevance: i64,
}

/// Stable sort by `relevance` descending, `document_id` ascending
/// tie-break, truncated to the top `k`. Pure; empty input or `k == 0`
/// yields empty output.
pub fn rank(mut results: Vec<SearchResult>, k: usize) -> Vec<SearchResult> {
    results.sort_by(|a, b| {
        b.relevance
            .cmp(&a.relevance)
            .then_with(|| a.document_id.cmp(&b.document_id))
    });
    results.truncate(k);
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(id: i64, relevance: i64) -> SearchResult {
        SearchResult {
            document_id: id,
            url: format!("https://example.com/{id}"),
            relevance,
        }
    }

    #[test]
    fn sorts_by_relevance_descending() {
        let ranked = rank(vec![r(1, 1), r(2, 5), r(3, 3)], 10);
        assert_eq!(
            ranked.iter().map(|x| x.document_id).collect::<Vec<_>>(),
            vec![2, 3, 1]
        );
    }

    #[test]
    fn ties_break_by_ascending_document_id() {
        let ranked = rank(vec![r(3, 2), r(1, 2), r(2, 2)], 10);
        assert_eq!(
            ranked.iter().map(|x| x.document_id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn truncates_to_k() {
        let ranked = rank(vec![r(1, 3), r(2, 2), r(3, 1)], 2);
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn zero_k_yields_empty() {
        assert!(rank(vec![r(1, 1)], 0).is_empty());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(rank(vec![], 5).is_empty());
    }
}
