//! Shared test utilities for innings integration tests.
//!
//! Each test gets its own SQLite file inside a fresh temporary directory.
//! The directory (and the database with it) is removed when the returned
//! [`TestStore`] is dropped.

use std::path::PathBuf;

use chrono::{DateTime, Duration, TimeZone, Utc};
use sqlx::SqlitePool;
use tempfile::TempDir;

use innings_db::config::DbConfig;
use innings_db::models::{FlowKind, NewRoadmap};
use innings_db::{LocalStore, pool};

/// A migrated store backed by a temporary database file.
pub struct TestStore {
    pub store: LocalStore,
    pub config: DbConfig,
    /// Held to keep the directory alive for the duration of the test.
    _dir: TempDir,
}

impl TestStore {
    pub fn pool(&self) -> &SqlitePool {
        self.store.pool()
    }

    pub fn path(&self) -> PathBuf {
        self.config
            .database_path()
            .expect("test database is file-backed")
    }
}

/// Create an empty, unmigrated database file and return its pool.
///
/// Returns `(pool, config, dir)`; keep `dir` alive while the pool is used.
pub async fn create_empty_db() -> (SqlitePool, DbConfig, TempDir) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let config = DbConfig::for_path(dir.path().join("innings_test.db"));
    let pool = pool::create_pool(&config)
        .await
        .unwrap_or_else(|e| panic!("failed to open temp database: {e:#}"));
    (pool, config, dir)
}

/// Create a temporary database with migrations applied.
pub async fn create_test_store() -> TestStore {
    let (pool, config, dir) = create_empty_db().await;
    pool::run_migrations(&pool)
        .await
        .expect("migrations should succeed");
    TestStore {
        store: LocalStore::new(pool),
        config,
        _dir: dir,
    }
}

/// A fixed reference time so ordering assertions are deterministic.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

/// A roadmap record created `minutes_after` the [`base_time`].
pub fn sample_roadmap(flow: FlowKind, sport: &str, minutes_after: i64) -> NewRoadmap {
    let mut record = NewRoadmap::new(
        flow,
        sport,
        format!("{sport} plan"),
        format!("summary for {sport}"),
        r#"{"title":"Plan","current_status_analysis":"ok","roadmap_steps":[],"key_institutions":[],"financial_aid_tips":[]}"#,
    );
    record.created_at = base_time() + Duration::minutes(minutes_after);
    record
}
