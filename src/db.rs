use std::sync::Arc;

use sqlx::{postgres::PgPoolOptions, Pool, Postgres};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::repositories::{InMemoryTokenRepository, PgTokenRepository, TokenRepository};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect(&config.url)
        .await?;

    Ok(pool)
}

/// Creates `users`, `api_accounts` and `api_tokens` if needed.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Builds the token store selected by `database.url`.
pub async fn connect_repository(config: &DatabaseConfig) -> Result<Arc<dyn TokenRepository>> {
    if config.is_memory() {
        tracing::warn!("Using in-memory token store; data is lost on restart");
        return Ok(Arc::new(InMemoryTokenRepository::new()));
    }

    tracing::info!("Connecting to database...");
    let pool = create_pool(config).await?;
    run_migrations(&pool).await?;
    tracing::info!("Database connection established");

    Ok(Arc::new(PgTokenRepository::new(pool)))
}
