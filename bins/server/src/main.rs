//! FactoryFlow API Server
//!
//! Main entry point for the FactoryFlow bookkeeping service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use factoryflow_api::{AppState, create_router};
use factoryflow_db::{LedgerStore, MemoryStore};
use factoryflow_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "factoryflow=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;

    let store: Arc<dyn LedgerStore> = Arc::new(MemoryStore::new());
    info!(
        max_records = config.verification.max_records,
        display_limit = config.verification.display_limit,
        "In-memory document store ready"
    );

    let state = AppState::new(store, config.verification.clone());
    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
