//! Router assembly: `GET /`, `GET|POST /search`, 404 fallback.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use search_core::store::IndexStore;
use search_core::TextNormalizer;

use crate::routes::{index_handler, not_found_handler, search_get_handler, search_post_handler, AppState};

pub fn build_app(store: Arc<dyn IndexStore>, normalizer: TextNormalizer, max_results: usize) -> Router {
    let state = AppState {
        store,
        normalizer: Arc::new(normalizer),
        max_results,
    };

    Router::new()
        .route("/", get(index_handler))
        .route("/search", get(search_get_handler).post(search_post_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
