mod app;
mod routes;
mod templates;
mod urldecode;

use std::sync::Arc;

use anyhow::{Context, Result};
use search_core::store::{IndexStore, PostgresIndexStore};
use search_core::{Config, TextNormalizer};
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,query_server=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("starting query server");

    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.ini".to_string());
    let config = Config::load(&config_path).context("failed to load configuration")?;

    tracing::info!(port = config.http_server.port, max_results = config.http_server.max_results, "configuration loaded");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database.connection_string())
        .await
        .context("failed to connect to database")?;

    let store: Arc<dyn IndexStore> = Arc::new(PostgresIndexStore::new(pool));
    store.init_schema().await.context("failed to initialize schema")?;

    let app = app::build_app(store, TextNormalizer::default(), config.http_server.max_results);

    let addr = format!("0.0.0.0:{}", config.http_server.port);
    tracing::info!(%addr, "listening");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("failed to bind to address")?;

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
