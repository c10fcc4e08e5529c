//! Postgres persistence for the taskboard backend.
//!
//! Models and repositories follow one pattern: a `FromRow` entity struct,
//! `Deserialize` create/update DTOs, and a zero-sized repository whose
//! methods take `&PgPool` first. [`rule_store::PgRuleStore`] adapts the pool
//! to the core crate's integrity-rule queries.

use sqlx::postgres::PgPoolOptions;

pub mod models;
pub mod repositories;
pub mod rule_store;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Run a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply all pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
