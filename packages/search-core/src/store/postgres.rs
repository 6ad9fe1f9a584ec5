use async_trait::async_trait;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use super::{Document, IndexStore};
use crate::errors::StorageError;
use crate::ranking::SearchResult;

/// `sqlx::PgPool`-backed `IndexStore`. Wraps a single pool that can be
/// cloned cheaply and shared across worker threads, one `PgPool` per
/// storage instance.
pub struct PostgresIndexStore {
    pool: PgPool,
}

impl PostgresIndexStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IndexStore for PostgresIndexStore {
    async fn init_schema(&self) -> Result<(), StorageError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                id BIGSERIAL PRIMARY KEY,
                url VARCHAR(2048) UNIQUE NOT NULL,
                content TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS words (
                id BIGSERIAL PRIMARY KEY,
                text VARCHAR(32) UNIQUE NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS word_frequencies (
                document_id BIGINT NOT NULL REFERENCES documents(id) ON DELETE CASCADE,
                word_id BIGINT NOT NULL REFERENCES words(id) ON DELETE CASCADE,
                frequency INTEGER NOT NULL,
                PRIMARY KEY (document_id, word_id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_documents_url ON documents(url)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_words_text ON words(text)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_word_frequencies_word_id ON word_frequencies(word_id)")
            .execute(&self.pool)
            .await?;
        sqlx::query("CREATE INDEX IF NOT EXISTS idx_word_frequencies_document_id ON word_frequencies(document_id)")
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn upsert_document(&self, url: &str, content: &str) -> Result<i64, StorageError> {
        let row = sqlx::query(
            r#"
            INSERT INTO documents (url, content)
            VALUES ($1, $2)
            ON CONFLICT (url) DO UPDATE SET content = EXCLUDED.content
            RETURNING id
            "#,
        )
        .bind(url)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    async fn find_document_by_url(&self, url: &str) -> Result<Option<Document>, StorageError> {
        let row = sqlx::query("SELECT id, url, content FROM documents WHERE url = $1")
            .bind(url)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Document {
            id: r.get("id"),
            url: r.get("url"),
            content: r.get("content"),
        }))
    }

    async fn find_document_by_id(&self, id: i64) -> Result<Option<Document>, StorageError> {
        let row = sqlx::query("SELECT id, url, content FROM documents WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| Document {
            id: r.get("id"),
            url: r.get("url"),
            content: r.get("content"),
        }))
    }

    async fn exists_by_url(&self, url: &str) -> Result<bool, StorageError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM documents WHERE url = $1) AS present")
            .bind(url)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("present"))
    }

    async fn find_all_documents(&self) -> Result<Vec<Document>, StorageError> {
        let rows = sqlx::query("SELECT id, url, content FROM documents ORDER BY id")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| Document {
                id: r.get("id"),
                url: r.get("url"),
                content: r.get("content"),
            })
            .collect())
    }

    async fn upsert_word(&self, text: &str) -> Result<i64, StorageError> {
        let row = sqlx::query(
            r#"
            INSERT INTO words (text)
            VALUES ($1)
            ON CONFLICT (text) DO UPDATE SET text = EXCLUDED.text
            RETURNING id
            "#,
        )
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.get("id"))
    }

    async fn save_word_frequencies(
        &self,
        document_id: i64,
        frequencies: &HashMap<String, i64>,
    ) -> Result<(), StorageError> {
        if frequencies.is_empty() {
            return Ok(());
        }

        let mut tx = self.pool.begin().await?;

        // Re-indexing must drop frequency rows for words that no longer
        // occur, or stale matches keep surfacing in search results.
        sqlx::query("DELETE FROM word_frequencies WHERE document_id = $1")
            .bind(document_id)
            .execute(&mut *tx)
            .await?;

        let mut word_ids = HashMap::with_capacity(frequencies.len());
        for word_text in frequencies.keys() {
            let row = sqlx::query(
                r#"
                INSERT INTO words (text)
                VALUES ($1)
                ON CONFLICT (text) DO UPDATE SET text = EXCLUDED.text
                RETURNING id
                "#,
            )
            .bind(word_text)
            .fetch_one(&mut *tx)
            .await?;
            word_ids.insert(word_text.clone(), row.get::<i64, _>("id"));
        }

        let mut sql = String::from("INSERT INTO word_frequencies (document_id, word_id, frequency) VALUES ");
        let mut placeholders = Vec::with_capacity(frequencies.len());
        let mut param_index = 1;
        for _ in frequencies {
            placeholders.push(format!("(${}, ${}, ${})", param_index, param_index + 1, param_index + 2));
            param_index += 3;
        }
        sql.push_str(&placeholders.join(", "));
        sql.push_str(" ON CONFLICT (document_id, word_id) DO UPDATE SET frequency = EXCLUDED.frequency");

        let mut q = sqlx::query(&sql);
        for (word_text, frequency) in frequencies {
            let word_id = word_ids[word_text];
            q = q.bind(document_id).bind(word_id).bind(*frequency as i32);
        }
        q.execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn search(&self, terms: &[String]) -> Result<Vec<SearchResult>, StorageError> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders: Vec<String> = (1..=terms.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            r#"
            SELECT d.id AS document_id, d.url AS url, SUM(wf.frequency) AS relevance
              FROM documents d
              JOIN word_frequencies wf ON wf.document_id = d.id
              JOIN words w ON w.id = wf.word_id
             WHERE w.text IN ({})
             GROUP BY d.id, d.url
            HAVING COUNT(DISTINCT w.id) = ${}
             ORDER BY relevance DESC, d.id ASC
            "#,
            placeholders.join(", "),
            terms.len() + 1
        );

        let mut query = sqlx::query(&sql);
        for term in terms {
            query = query.bind(term);
        }
        query = query.bind(terms.len() as i64);

        let rows = query.fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|r| SearchResult {
                document_id: r.get("document_id"),
                url: r.get("url"),
                relevance: r.get::<i64, _>("relevance"),
            })
            .collect())
    }
}
