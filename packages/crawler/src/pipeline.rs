//! Per-URL indexing pipeline: fetch, extract, normalize, tokenize, persist.

use search_core::store::IndexStore;
use search_core::{html, tokenizer, FrontierItem, TextNormalizer};

use crate::http_client::HttpClient;

/// Runs one Frontier item through the full indexing pipeline, enqueuing its
/// outlinks into `frontier` when `item.depth` hasn't reached `max_depth`.
/// Never propagates a page-level failure; every error is logged and
/// absorbed so the worker keeps running.
pub async fn process_item(
    worker_id: usize,
    item: &FrontierItem,
    http_client: &HttpClient,
    normalizer: &TextNormalizer,
    store: &dyn IndexStore,
    frontier: &search_core::Frontier,
    max_depth: u32,
) {
    tracing::info!(worker_id, depth = item.depth, url = %item.url, "processing");

    let html_body = match http_client.get(&item.url) {
        Ok(body) => body,
        Err(err) => {
            tracing::warn!(worker_id, url = %item.url, error = %err, "fetch failed, skipping");
            return;
        }
    };

    let text = html::extract_text(&html_body);
    let text = normalizer.normalize(&text);
    let text = normalizer.lowercase(&text);
    let frequencies = tokenizer::analyze_word_frequency(&text);

    let document_id = match store.upsert_document(&item.url, &text).await {
        Ok(id) => id,
        Err(err) => {
            tracing::warn!(worker_id, url = %item.url, error = %err, "failed to persist document, skipping");
            return;
        }
    };

    if let Err(err) = store.save_word_frequencies(document_id, &frequencies).await {
        tracing::warn!(worker_id, url = %item.url, document_id, error = %err, "failed to persist frequencies");
        return;
    }

    tracing::info!(worker_id, document_id, url = %item.url, word_count = frequencies.len(), "indexed");

    if item.depth < max_depth {
        let links = html::extract_links(&html_body, &item.url);
        tracing::debug!(worker_id, url = %item.url, link_count = links.len(), "extracted links");
        for link in links {
            frontier.push(link, item.depth + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use search_core::errors::StorageError;
    use search_core::ranking::SearchResult;
    use search_core::store::Document;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct MockStore {
        documents: Mutex<HashMap<String, Document>>,
        frequencies: Mutex<HashMap<i64, HashMap<String, i64>>>,
        next_id: Mutex<i64>,
    }

    impl MockStore {
        fn new() -> Self {
            Self {
                documents: Mutex::new(HashMap::new()),
                frequencies: Mutex::new(HashMap::new()),
                next_id: Mutex::new(1),
            }
        }
    }

    #[async_trait]
    impl IndexStore for MockStore {
        async fn init_schema(&self) -> Result<(), StorageError> {
            Ok(())
        }

        async fn upsert_document(&self, url: &str, content: &str) -> Result<i64, StorageError> {
            let mut docs = self.documents.lock().unwrap();
            if let Some(existing) = docs.get(url) {
                let id = existing.id;
                docs.insert(
                    url.to_string(),
                    Document {
                        id,
                        url: url.to_string(),
                        content: content.to_string(),
                    },
                );
                return Ok(id);
            }
            let mut next_id = self.next_id.lock().unwrap();
            let id = *next_id;
            *next_id += 1;
            docs.insert(
                url.to_string(),
                Document {
                    id,
                    url: url.to_string(),
                    content: content.to_string(),
                },
            );
            Ok(id)
        }

        async fn find_document_by_url(&self, url: &str) -> Result<Option<Document>, StorageError> {
            Ok(self.documents.lock().unwrap().get(url).cloned())
        }

        async fn find_document_by_id(&self, id: i64) -> Result<Option<Document>, StorageError> {
            Ok(self.documents.lock().unwrap().values().find(|d| d.id == id).cloned())
        }

        async fn exists_by_url(&self, url: &str) -> Result<bool, StorageError> {
            Ok(self.documents.lock().unwrap().contains_key(url))
        }

        async fn find_all_documents(&self) -> Result<Vec<Document>, StorageError> {
            Ok(self.documents.lock().unwrap().values().cloned().collect())
        }

        async fn upsert_word(&self, _text: &str) -> Result<i64, StorageError> {
            Ok(1)
        }

        async fn save_word_frequencies(
            &self,
            document_id: i64,
            frequencies: &HashMap<String, i64>,
        ) -> Result<(), StorageError> {
            self.frequencies
                .lock()
                .unwrap()
                .insert(document_id, frequencies.clone());
            Ok(())
        }

        async fn search(&self, _terms: &[String]) -> Result<Vec<SearchResult>, StorageError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn absorbs_fetch_failure_without_panicking() {
        let store = MockStore::new();
        let frontier = search_core::Frontier::new();
        let http_client = HttpClient::new(1);
        let normalizer = TextNormalizer::default();

        let item = FrontierItem {
            url: "http://127.0.0.1:1/unreachable".to_string(),
            depth: 1,
        };

        process_item(1, &item, &http_client, &normalizer, &store, &frontier, 3).await;

        assert!(store.documents.lock().unwrap().is_empty());
    }
}
