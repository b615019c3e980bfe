//! The local persistence store.
//!
//! [`LocalStore`] wraps the query functions with change notification so
//! consumers can hold a live view of a collection. Every committed write
//! publishes a [`Collection`] on a broadcast channel; subscription streams
//! re-run their query when their collection changes.
//!
//! ```text
//! add_roadmap / delete_roadmap --> Collection::Roadmaps -----+
//! toggle_star -------------------> Collection::Opportunities |
//!                                                           v
//!                 subscribe_roadmaps(query) --> Stream<Vec<Roadmap>>
//! ```

use std::pin::Pin;

use futures::Stream;
use sqlx::SqlitePool;
use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::error::StoreResult;
use crate::models::{
    NewRoadmap, OpportunityCategory, OpportunityRef, Roadmap, RoadmapQuery, StarredOpportunity,
};
use crate::queries::{opportunities, roadmaps};

/// Which collection a change touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Roadmaps,
    Opportunities,
}

/// A boxed stream of query results.
pub type LiveQuery<T> = Pin<Box<dyn Stream<Item = StoreResult<Vec<T>>> + Send>>;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Durable store for saved roadmaps and starred opportunities.
#[derive(Debug, Clone)]
pub struct LocalStore {
    pool: SqlitePool,
    changes: broadcast::Sender<Collection>,
}

impl LocalStore {
    /// Wrap an already-migrated pool.
    pub fn new(pool: SqlitePool) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { pool, changes }
    }

    /// The underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the underlying pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    fn notify(&self, collection: Collection) {
        // No receivers is fine: nobody is watching.
        let _ = self.changes.send(collection);
    }

    // -- Roadmaps --

    /// Save a roadmap and return its new id.
    pub async fn add_roadmap(&self, record: &NewRoadmap) -> StoreResult<i64> {
        let id = roadmaps::insert_roadmap(&self.pool, record).await?;
        info!(id, flow = %record.flow, sport = %record.sport, "roadmap saved");
        self.notify(Collection::Roadmaps);
        Ok(id)
    }

    /// Delete a roadmap. Deleting a missing id is a no-op.
    pub async fn delete_roadmap(&self, id: i64) -> StoreResult<()> {
        if roadmaps::delete_roadmap(&self.pool, id).await? {
            info!(id, "roadmap deleted");
            self.notify(Collection::Roadmaps);
        } else {
            debug!(id, "roadmap already absent");
        }
        Ok(())
    }

    pub async fn get_roadmap(&self, id: i64) -> StoreResult<Option<Roadmap>> {
        roadmaps::get_roadmap(&self.pool, id).await
    }

    pub async fn list_roadmaps(&self, query: &RoadmapQuery) -> StoreResult<Vec<Roadmap>> {
        roadmaps::list_roadmaps(&self.pool, query).await
    }

    /// Number of roadmaps matching the query's filters.
    pub async fn count_roadmaps(&self, query: &RoadmapQuery) -> StoreResult<i64> {
        roadmaps::count_roadmaps(&self.pool, query).await
    }

    /// Live view of the roadmaps matching `query`.
    ///
    /// Yields the current result immediately, then a fresh result after every
    /// change to the roadmaps collection. The stream ends once the store and
    /// all of its clones are dropped.
    pub fn subscribe_roadmaps(&self, query: RoadmapQuery) -> LiveQuery<Roadmap> {
        let pool = self.pool.clone();
        self.subscribe(Collection::Roadmaps, move || {
            let pool = pool.clone();
            let query = query.clone();
            async move { roadmaps::list_roadmaps(&pool, &query).await }
        })
    }

    // -- Opportunities --

    pub async fn is_starred(&self, id: &str) -> StoreResult<bool> {
        opportunities::is_starred(&self.pool, id).await
    }

    /// Star the opportunity if absent, unstar it if present.
    ///
    /// Returns the new state.
    pub async fn toggle_star(&self, opportunity: &OpportunityRef) -> StoreResult<bool> {
        let starred = opportunities::toggle_star(&self.pool, opportunity).await?;
        info!(id = %opportunity.id, starred, "opportunity star toggled");
        self.notify(Collection::Opportunities);
        Ok(starred)
    }

    pub async fn list_starred(
        &self,
        category: Option<OpportunityCategory>,
    ) -> StoreResult<Vec<StarredOpportunity>> {
        opportunities::list_starred(&self.pool, category).await
    }

    /// Live view of the starred opportunities, optionally for one category.
    pub fn subscribe_starred(
        &self,
        category: Option<OpportunityCategory>,
    ) -> LiveQuery<StarredOpportunity> {
        let pool = self.pool.clone();
        self.subscribe(Collection::Opportunities, move || {
            let pool = pool.clone();
            async move { opportunities::list_starred(&pool, category).await }
        })
    }

    fn subscribe<T, F, Fut>(&self, collection: Collection, fetch: F) -> LiveQuery<T>
    where
        T: Send + 'static,
        F: Fn() -> Fut + Send + 'static,
        Fut: std::future::Future<Output = StoreResult<Vec<T>>> + Send + 'static,
    {
        // Subscribe before the first fetch so no change slips in between.
        let mut rx = self.changes.subscribe();

        Box::pin(async_stream::stream! {
            yield fetch().await;

            loop {
                match rx.recv().await {
                    Ok(changed) if changed == collection => {
                        yield fetch().await;
                    }
                    Ok(_) => {}
                    // Missed some notifications; one refetch covers them all.
                    Err(broadcast::error::RecvError::Lagged(_)) => {
                        yield fetch().await;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        })
    }
}
