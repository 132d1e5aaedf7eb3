//! PostgreSQL persistence for the monitoring engine.
//!
//! - [`models`] -- row structs and insert DTOs.
//! - [`repositories`] -- zero-sized repos with async queries taking `&PgPool`.
//! - [`stores`] -- adapters implementing the `eggwatch-core` ports over a pool.

use std::time::Duration;

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod stores;

pub type DbPool = sqlx::PgPool;

/// Maximum number of pooled connections.
const MAX_CONNECTIONS: u32 = 20;

/// Create a connection pool from a database URL.
///
/// `acquire_timeout` bounds how long a query waits for a free connection, so
/// an exhausted or unreachable database surfaces as an error rather than a hang.
pub async fn create_pool(
    database_url: &str,
    acquire_timeout: Duration,
) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(acquire_timeout)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
