mod http_client;
mod pipeline;
mod pool;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use anyhow::{Context, Result};
use search_core::store::{IndexStore, PostgresIndexStore};
use search_core::{Config, Frontier};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pool::WorkerPoolConfig;

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,crawler=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting crawler");

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.ini".to_string());
    tracing::info!(config_path = %config_path, "loading configuration");
    let config = Config::load(&config_path).context("failed to load configuration")?;

    tracing::info!(
        start_url = %config.spider.start_url,
        crawl_depth = config.spider.crawl_depth,
        thread_pool_size = config.spider.thread_pool_size,
        "configuration loaded"
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(init_schema(&config))?;

    let frontier = Arc::new(Frontier::new());
    frontier.push(config.spider.start_url.clone(), 1);

    let shutdown = Arc::new(AtomicBool::new(false));
    spawn_shutdown_listener(shutdown.clone());

    let pool_config = WorkerPoolConfig {
        size: config.spider.thread_pool_size,
        max_depth: config.spider.crawl_depth,
        database_url: config.database.connection_string(),
        request_timeout_secs: 10,
    };

    tracing::info!(worker_count = pool_config.size, "starting worker pool");
    pool::run(frontier.clone(), pool_config, shutdown)?;

    tracing::info!(visited_count = frontier.visited_count(), "crawl complete");
    Ok(())
}

async fn init_schema(config: &Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&config.database.connection_string())
        .await
        .context("failed to connect to database")?;
    let store = PostgresIndexStore::new(pool);
    store.init_schema().await.context("failed to initialize schema")?;
    tracing::info!("schema ready");
    Ok(())
}

/// Flips `shutdown` on Ctrl-C, letting the worker pool drain in-flight work
/// and stop accepting new pushes rather than aborting mid-page.
fn spawn_shutdown_listener(shutdown: Arc<AtomicBool>) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Runtime::new() {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::warn!(error = %err, "could not start shutdown listener");
                return;
            }
        };
        runtime.block_on(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("received shutdown signal, draining in-flight work");
                shutdown.store(true, Ordering::Relaxed);
            }
        });
    });
}
