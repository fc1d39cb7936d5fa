//! PostgreSQL connection pool and schema migrations

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use thiserror::Error;

use crate::config::DatabaseConfig;

/// Failures while bringing the database up
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[source] sqlx::migrate::MigrateError),
}

/// Connects the pool and applies pending migrations from `migrations/`
pub async fn init_pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await
        .map_err(DatabaseError::Connection)?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .map_err(DatabaseError::Migration)?;

    tracing::info!("Database connected successfully");
    Ok(pool)
}
