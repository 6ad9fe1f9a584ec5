//! Fixed-size worker pool. Each worker is a real OS thread that builds its
//! own single-threaded tokio runtime and blocks on it, giving every worker
//! an independent database session and HTTP client without pulling the
//! whole program onto one multi-threaded runtime.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use search_core::store::{IndexStore, PostgresIndexStore};
use search_core::Frontier;

use crate::http_client::HttpClient;
use crate::pipeline::process_item;

pub struct WorkerPoolConfig {
    pub size: usize,
    pub max_depth: u32,
    pub database_url: String,
    pub request_timeout_secs: u64,
}

/// Spawns `config.size` worker threads bound to `frontier`'s lifetime and
/// blocks until every worker observes the Frontier's DONE transition (or
/// `shutdown` is set). Each worker connects its own single-connection pool;
/// `PgPool` itself pools internally, but one pool per worker keeps a
/// strict one-session-per-thread discipline.
pub fn run(frontier: Arc<Frontier>, config: WorkerPoolConfig, shutdown: Arc<AtomicBool>) -> anyhow::Result<()> {
    let mut handles = Vec::with_capacity(config.size);

    for worker_id in 1..=config.size {
        let frontier = frontier.clone();
        let database_url = config.database_url.clone();
        let max_depth = config.max_depth;
        let timeout_secs = config.request_timeout_secs;
        let shutdown = shutdown.clone();

        handles.push(thread::spawn(move || -> anyhow::Result<()> {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;

            runtime.block_on(async move {
                let pool: PgPool = PgPoolOptions::new()
                    .max_connections(1)
                    .connect(&database_url)
                    .await?;
                let store = PostgresIndexStore::new(pool);
                let http_client = HttpClient::new(timeout_secs);
                let normalizer = search_core::TextNormalizer::default();

                worker_loop(worker_id, &frontier, &store, &http_client, &normalizer, max_depth, &shutdown).await;
                Ok::<(), anyhow::Error>(())
            })
        }));
    }

    for handle in handles {
        handle
            .join()
            .map_err(|_| anyhow::anyhow!("worker thread panicked"))??;
    }

    Ok(())
}

async fn worker_loop(
    worker_id: usize,
    frontier: &Frontier,
    store: &dyn IndexStore,
    http_client: &HttpClient,
    normalizer: &search_core::TextNormalizer,
    max_depth: u32,
    shutdown: &AtomicBool,
) {
    loop {
        if shutdown.load(Ordering::Relaxed) {
            frontier.shutdown();
        }

        let Some(item) = frontier.pop() else {
            tracing::info!(worker_id, "no more work, exiting");
            break;
        };

        process_item(worker_id, &item, http_client, normalizer, store, frontier, max_depth).await;
        frontier.mark_completed();
    }
}
