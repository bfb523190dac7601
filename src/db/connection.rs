//! Database connection management

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::DatabaseConfig;
use crate::constants::DATABASE_ACQUIRE_TIMEOUT_SECS;

/// Create the connection pool shared by every repository.
///
/// Connections are held per query only; an evaluation run never keeps one
/// across execution service calls, so acquire waits are bounded.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(DATABASE_ACQUIRE_TIMEOUT_SECS))
        .connect(&config.url)
        .await
}

/// Round-trip a trivial query so startup fails fast on a bad database
pub async fn test_connection(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
