//! Database query functions for the `opportunities` table (starred items).

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::{StoreError, StoreResult};
use crate::models::{OpportunityCategory, OpportunityRef, StarredOpportunity};

/// Whether an opportunity is currently starred.
pub async fn is_starred(pool: &SqlitePool, id: &str) -> StoreResult<bool> {
    let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM opportunities WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await?;

    Ok(exists)
}

/// Star the opportunity if absent, unstar it if present.
///
/// Presence is re-checked inside a single transaction on every call, so
/// rapid repeated toggles never act on a stale view. Returns the new state
/// (`true` when the opportunity is now starred).
pub async fn toggle_star(pool: &SqlitePool, opportunity: &OpportunityRef) -> StoreResult<bool> {
    if opportunity.id.trim().is_empty() {
        return Err(StoreError::EmptyOpportunityId);
    }

    let mut tx = pool.begin().await?;

    // The DELETE takes the write lock first, so the insert below cannot race
    // another toggle of the same id.
    let removed = sqlx::query("DELETE FROM opportunities WHERE id = $1")
        .bind(&opportunity.id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    let starred = if removed > 0 {
        false
    } else {
        sqlx::query(
            "INSERT INTO opportunities (id, category, title, starred_at) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(&opportunity.id)
        .bind(opportunity.category)
        .bind(&opportunity.title)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;
        true
    };

    tx.commit().await?;
    Ok(starred)
}

/// List starred opportunities, optionally restricted to one category.
///
/// Most recently starred first.
pub async fn list_starred(
    pool: &SqlitePool,
    category: Option<OpportunityCategory>,
) -> StoreResult<Vec<StarredOpportunity>> {
    let rows = match category {
        Some(category) => {
            sqlx::query_as::<_, StarredOpportunity>(
                "SELECT * FROM opportunities WHERE category = $1 \
                 ORDER BY starred_at DESC, id",
            )
            .bind(category)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, StarredOpportunity>(
                "SELECT * FROM opportunities ORDER BY starred_at DESC, id",
            )
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}
