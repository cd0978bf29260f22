use std::time::Duration;

use fleet_sync_config::DatabaseConfig;
use fleet_sync_core::{SyncError, SyncResult};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Builds the process-wide connection pool. Constructed once at start-up,
/// injected into the application, closed on shutdown.
pub async fn create_pool(config: &DatabaseConfig) -> SyncResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds))
        .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
        .connect(&config.url)
        .await
        .map_err(SyncError::Database)?;

    info!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> SyncResult<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| SyncError::persistence_error(format!("migration failed: {e}")))?;
    Ok(())
}
