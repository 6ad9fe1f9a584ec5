//! Persistent inverted-index store.

mod postgres;

pub use postgres::PostgresIndexStore;

use crate::errors::StorageError;
use crate::ranking::SearchResult;
use async_trait::async_trait;
use std::collections::HashMap;

/// A crawled page. `id == 0` means "not yet persisted".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub id: i64,
    pub url: String,
    pub content: String,
}

/// Persistence operations for documents, words, and word frequencies.
/// Every method runs in its own database transaction; the store retains no
/// state across calls, so a single instance can be shared across worker
/// threads.
#[async_trait]
pub trait IndexStore: Send + Sync {
    /// Creates the schema if absent. Safe to call repeatedly.
    async fn init_schema(&self) -> Result<(), StorageError>;

    /// Inserts a new document or replaces an existing one's `content`,
    /// returning its id either way.
    async fn upsert_document(&self, url: &str, content: &str) -> Result<i64, StorageError>;

    async fn find_document_by_url(&self, url: &str) -> Result<Option<Document>, StorageError>;

    async fn find_document_by_id(&self, id: i64) -> Result<Option<Document>, StorageError>;

    async fn exists_by_url(&self, url: &str) -> Result<bool, StorageError>;

    async fn find_all_documents(&self) -> Result<Vec<Document>, StorageError>;

    /// Insert-or-get a word by its normalized text, returning its id.
    async fn upsert_word(&self, text: &str) -> Result<i64, StorageError>;

    /// Replaces `document_id`'s frequency rows with `frequencies` inside a
    /// single transaction: deletes stale rows for words that no longer
    /// occur, upserts every word, then batch-upserts the
    /// `(document_id, word_id, frequency)` rows. An empty map is a no-op.
    async fn save_word_frequencies(
        &self,
        document_id: i64,
        frequencies: &HashMap<String, i64>,
    ) -> Result<(), StorageError>;

    /// Conjunctive match: every document containing all of `terms`,
    /// ranked by summed frequency. Empty `terms` returns an empty result.
    async fn search(&self, terms: &[String]) -> Result<Vec<SearchResult>, StorageError>;
}
