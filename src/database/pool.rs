use std::time::Duration;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::database::error::DataError;

/// Build the process-wide connection pool from `DATABASE_URL`. The pool is the
/// only cross-request shared resource; connections are acquired and released
/// inside each statement, including on error paths.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DataError> {
    let url = std::env::var("DATABASE_URL")
        .map_err(|_| DataError::Transport("DATABASE_URL is not set".to_string()))?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect(&url)
        .await?;

    info!(max_connections = config.max_connections, "database pool ready");
    Ok(pool)
}

/// Pings the pool to confirm connectivity.
pub async fn health_check(pool: &PgPool) -> Result<(), DataError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
