//! Ordered, additive schema migrations.
//!
//! The applied version is tracked in SQLite's `PRAGMA user_version`. Each
//! step runs inside its own transaction together with the version bump, and
//! only uses `IF NOT EXISTS` DDL, so re-running a step is harmless.
//!
//! Steps only ever add collections, columns, or indexes. Existing tables are
//! never dropped or renamed.

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{debug, info};

/// A single forward-only schema step.
#[derive(Debug)]
pub struct Migration {
    /// Schema version reached once this step has been applied.
    pub version: i64,
    /// Short human-readable description for logs.
    pub description: &'static str,
    /// DDL statements executed in order.
    pub statements: &'static [&'static str],
}

/// All migrations, ordered by version.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "roadmaps",
        statements: &[
            "CREATE TABLE IF NOT EXISTS roadmaps (\
                id INTEGER PRIMARY KEY AUTOINCREMENT, \
                flow TEXT NOT NULL CHECK (flow IN ('discovery', 'pivot')), \
                sport TEXT NOT NULL, \
                title TEXT NOT NULL, \
                summary TEXT NOT NULL, \
                full_content TEXT NOT NULL, \
                created_at TEXT NOT NULL\
            )",
            "CREATE INDEX IF NOT EXISTS idx_roadmaps_flow ON roadmaps (flow)",
            "CREATE INDEX IF NOT EXISTS idx_roadmaps_sport ON roadmaps (sport)",
            "CREATE INDEX IF NOT EXISTS idx_roadmaps_created_at ON roadmaps (created_at)",
        ],
    },
    Migration {
        version: 2,
        description: "starred opportunities",
        statements: &[
            "CREATE TABLE IF NOT EXISTS opportunities (\
                id TEXT PRIMARY KEY NOT NULL, \
                category TEXT NOT NULL CHECK (category IN ('pension', 'scholarship', 'job')), \
                title TEXT NOT NULL DEFAULT '', \
                starred_at TEXT NOT NULL\
            )",
            "CREATE INDEX IF NOT EXISTS idx_opportunities_category ON opportunities (category)",
        ],
    },
];

/// The schema version this build expects.
pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

/// Read the schema version marker.
pub async fn current_version(pool: &SqlitePool) -> Result<i64> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
        .context("failed to read schema version")?;
    Ok(version)
}

/// Apply every pending migration up to and including `target`.
///
/// Returns the versions that were applied by this call.
pub async fn migrate_to(pool: &SqlitePool, target: i64) -> Result<Vec<i64>> {
    let current = current_version(pool).await?;
    let mut applied = Vec::new();

    for migration in MIGRATIONS
        .iter()
        .filter(|m| m.version > current && m.version <= target)
    {
        let mut tx = pool
            .begin()
            .await
            .context("failed to begin migration transaction")?;

        for stmt in migration.statements {
            sqlx::query(stmt).execute(&mut *tx).await.with_context(|| {
                format!(
                    "migration {} ({}) failed",
                    migration.version, migration.description
                )
            })?;
        }

        // PRAGMA does not accept bind parameters; the version is a constant.
        let bump = format!("PRAGMA user_version = {}", migration.version);
        sqlx::query(&bump)
            .execute(&mut *tx)
            .await
            .context("failed to record schema version")?;

        tx.commit()
            .await
            .with_context(|| format!("failed to commit migration {}", migration.version))?;

        info!(
            version = migration.version,
            description = migration.description,
            "migration applied"
        );
        applied.push(migration.version);
    }

    if applied.is_empty() {
        debug!(version = current, "schema already up to date");
    }

    Ok(applied)
}

/// Apply every pending migration.
pub async fn migrate_to_latest(pool: &SqlitePool) -> Result<Vec<i64>> {
    migrate_to(pool, latest_version()).await
}
