//! `GET /`, `GET /search`, `POST /search` handlers.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use search_core::store::IndexStore;
use search_core::{rank, SearchQueryValue, TextNormalizer};

use crate::templates;
use crate::urldecode::urldecode;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IndexStore>,
    pub normalizer: Arc<TextNormalizer>,
    pub max_results: usize,
}

pub async fn index_handler() -> Html<String> {
    Html(templates::index_page())
}

/// `GET /search?query=...`. No `query` param (or empty) renders the bare
/// form; otherwise runs the query pipeline.
pub async fn search_get_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match params.get("query") {
        Some(raw) if !raw.trim().is_empty() => run_query_pipeline(&state, raw).await,
        _ => Html(templates::index_page()).into_response(),
    }
}

/// `POST /search` with an `application/x-www-form-urlencoded` body
/// `query=<urlencoded>`, decoded by hand with the `+`/`%XX` rule rather
/// than via `axum::Form`.
pub async fn search_post_handler(State(state): State<AppState>, body: String) -> Response {
    let raw_query = body
        .split('&')
        .find_map(|pair| pair.strip_prefix("query="))
        .map(urldecode)
        .unwrap_or_default();

    if raw_query.trim().is_empty() {
        return Html(templates::index_page()).into_response();
    }

    run_query_pipeline(&state, &raw_query).await
}

async fn run_query_pipeline(state: &AppState, raw_query: &str) -> Response {
    let query = match SearchQueryValue::parse(raw_query) {
        Ok(query) => query,
        Err(err) => {
            return (
                StatusCode::BAD_REQUEST,
                Html(templates::error_page(&err.to_string())),
            )
                .into_response()
        }
    };

    let terms: Vec<String> = query
        .terms()
        .iter()
        .map(|term| state.normalizer.normalize_and_lowercase(term))
        .collect();

    let results = match state.store.search(&terms).await {
        Ok(results) => results,
        Err(err) => {
            tracing::error!(error = %err, query = %raw_query, "search failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(templates::error_page("internal error, please try again")),
            )
                .into_response();
        }
    };

    let ranked = rank(results, state.max_results);
    Html(templates::results_page(query.original(), &ranked)).into_response()
}

pub async fn not_found_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(templates::error_page("page not found")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use search_core::errors::StorageError;
    use search_core::ranking::SearchResult;
    use search_core::store::Document;

    struct FixedStore {
        results: Vec<SearchResult>,
    }

    #[async_trait]
    impl IndexStore for FixedStore {
        async fn init_schema(&self) -> Result<(), StorageError> {
            Ok(())
        }
        async fn upsert_document(&self, _url: &str, _content: &str) -> Result<i64, StorageError> {
            Ok(1)
        }
        async fn find_document_by_url(&self, _url: &str) -> Result<Option<Document>, StorageError> {
            Ok(None)
        }
        async fn find_document_by_id(&self, _id: i64) -> Result<Option<Document>, StorageError> {
            Ok(None)
        }
        async fn exists_by_url(&self, _url: &str) -> Result<bool, StorageError> {
            Ok(false)
        }
        async fn find_all_documents(&self) -> Result<Vec<Document>, StorageError> {
            Ok(Vec::new())
        }
        async fn upsert_word(&self, _text: &str) -> Result<i64, StorageError> {
            Ok(1)
        }
        async fn save_word_frequencies(
            &self,
            _document_id: i64,
            _frequencies: &std::collections::HashMap<String, i64>,
        ) -> Result<(), StorageError> {
            Ok(())
        }
        async fn search(&self, _terms: &[String]) -> Result<Vec<SearchResult>, StorageError> {
            Ok(self.results.clone())
        }
    }

    fn state_with(results: Vec<SearchResult>) -> AppState {
        AppState {
            store: Arc::new(FixedStore { results }),
            normalizer: Arc::new(TextNormalizer::default()),
            max_results: 10,
        }
    }

    #[tokio::test]
    async fn empty_query_renders_form_not_pipeline() {
        let state = state_with(vec![]);
        let mut params = HashMap::new();
        params.insert("query".to_string(), "   ".to_string());
        let response = search_get_handler(State(state), Query(params)).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn five_terms_is_rejected_as_bad_request() {
        let state = state_with(vec![]);
        let response = run_query_pipeline(&state, "a b c d e").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn valid_query_returns_ok() {
        let state = state_with(vec![SearchResult {
            document_id: 1,
            url: "https://example.com".to_string(),
            relevance: 3,
        }]);
        let response = run_query_pipeline(&state, "cat dog").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn post_decodes_form_body() {
        let state = state_with(vec![]);
        let response = search_post_handler(State(state), "query=cat+dog".to_string()).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
