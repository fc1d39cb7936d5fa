use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ecocycle_api::api::{create_router, AppState};
use ecocycle_api::config::{AppConfig, StorageBackend};
use ecocycle_api::infrastructure::database::init_pool;
use ecocycle_api::infrastructure::repositories::{
    PostgresPickupRepository, PostgresUserRepository,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;

    let state = match config.storage {
        StorageBackend::Postgres => {
            let pool = init_pool(&config.database).await?;
            AppState::new(
                Arc::new(PostgresUserRepository::new(pool.clone())),
                Arc::new(PostgresPickupRepository::new(pool)),
                &config,
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            AppState::in_memory(&config)
        }
    };

    let app = create_router(state);

    // Start server
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
