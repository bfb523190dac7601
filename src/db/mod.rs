//! Database module
//!
//! Connection pooling, migrations and the repositories built on top.

pub mod connection;
pub mod repositories;

use sqlx::PgPool;

pub use connection::*;

/// Apply any migrations the schema does not have yet
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
