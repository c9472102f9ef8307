//! PostgreSQL persistence for the Courier dispatch core.
//!
//! Row models live in [`models`] (distinct from the `courier-core` domain
//! models), zero-sized repositories in [`repositories`], and
//! [`PgSubscriptionStore`](store::PgSubscriptionStore) implements the
//! `SubscriptionStore` seam the dispatch core consumes.

pub mod models;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use store::PgSubscriptionStore;

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Verify the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
