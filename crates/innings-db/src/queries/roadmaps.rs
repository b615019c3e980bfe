//! Database query functions for the `roadmaps` table.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::{StoreError, StoreResult};
use crate::models::{NewRoadmap, Roadmap, RoadmapOrder, RoadmapQuery};

/// Insert a new roadmap row and return its id.
///
/// The record is validated first; a blank required field fails with
/// [`StoreError::InvalidRecord`] before anything touches the database.
pub async fn insert_roadmap(pool: &SqlitePool, record: &NewRoadmap) -> StoreResult<i64> {
    if let Some(field) = record.missing_field() {
        return Err(StoreError::InvalidRecord { field });
    }

    let id: i64 = sqlx::query_scalar(
        "INSERT INTO roadmaps (flow, sport, title, summary, full_content, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6) \
         RETURNING id",
    )
    .bind(record.flow)
    .bind(&record.sport)
    .bind(&record.title)
    .bind(&record.summary)
    .bind(&record.full_content)
    .bind(record.created_at)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// Fetch a roadmap by its id.
pub async fn get_roadmap(pool: &SqlitePool, id: i64) -> StoreResult<Option<Roadmap>> {
    let roadmap = sqlx::query_as::<_, Roadmap>("SELECT * FROM roadmaps WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(roadmap)
}

/// List roadmaps matching `query`, ordered by creation time.
///
/// Ties on `created_at` fall back to the id so the order is stable.
pub async fn list_roadmaps(pool: &SqlitePool, query: &RoadmapQuery) -> StoreResult<Vec<Roadmap>> {
    let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM roadmaps WHERE 1 = 1");

    if let Some(flow) = query.flow {
        builder.push(" AND flow = ").push_bind(flow);
    }
    if let Some(sport) = &query.sport {
        builder.push(" AND sport = ").push_bind(sport.clone());
    }

    builder.push(match query.order {
        RoadmapOrder::NewestFirst => " ORDER BY created_at DESC, id DESC",
        RoadmapOrder::OldestFirst => " ORDER BY created_at ASC, id ASC",
    });

    let roadmaps = builder.build_query_as::<Roadmap>().fetch_all(pool).await?;
    Ok(roadmaps)
}

/// Delete a roadmap. Returns `true` if a row was removed.
///
/// Deleting an id that does not exist is not an error.
pub async fn delete_roadmap(pool: &SqlitePool, id: i64) -> StoreResult<bool> {
    let result = sqlx::query("DELETE FROM roadmaps WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Count saved roadmaps, optionally for one flow.
pub async fn count_roadmaps(pool: &SqlitePool, query: &RoadmapQuery) -> StoreResult<i64> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new("SELECT COUNT(*) FROM roadmaps WHERE 1 = 1");
    if let Some(flow) = query.flow {
        builder.push(" AND flow = ").push_bind(flow);
    }
    if let Some(sport) = &query.sport {
        builder.push(" AND sport = ").push_bind(sport.clone());
    }

    let count: i64 = builder.build_query_scalar().fetch_one(pool).await?;
    Ok(count)
}
