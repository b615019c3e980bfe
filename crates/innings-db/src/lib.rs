//! Local persistence for saved roadmaps and starred opportunities.
//!
//! SQLite via `sqlx`, with an ordered migration list and a [`LocalStore`]
//! that exposes live subscriptions over both collections.

pub mod config;
pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod queries;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{Collection, LiveQuery, LocalStore};

/// Open (creating if needed) and migrate the database described by `config`.
pub async fn open_store(config: &config::DbConfig) -> anyhow::Result<LocalStore> {
    pool::ensure_database_exists(config).await?;
    let pool = pool::create_pool(config).await?;
    pool::run_migrations(&pool).await?;
    Ok(LocalStore::new(pool))
}
