use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use product_search::app::{self, AppState};
use product_search::config;
use product_search::database::{DatabaseManager, PgApiKeyVerifier, PgProductStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = config::config();
    tracing::info!("Starting Product Search API in {:?} mode", config.environment);

    let pool = DatabaseManager::connect(&config.database).context("failed to configure database pool")?;

    let verifier = PgApiKeyVerifier::new(pool.clone(), config.database.api_keys_table.clone());
    let store = PgProductStore::new(pool.clone(), config.database.products_table.clone())
        .with_query_logging(config.database.enable_query_logging);

    let state = AppState::new(Arc::new(verifier), Arc::new(store))
        .with_max_body_bytes(config.api.max_request_size_bytes)
        .with_request_logging(config.api.enable_request_logging);

    let mut router = app::router(state);
    if let Some(cors) = app::cors_layer(&config.security) {
        router = router.layer(cors);
    }

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Product Search API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    tracing::info!("Database pool closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
