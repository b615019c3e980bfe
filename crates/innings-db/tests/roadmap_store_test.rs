//! Integration tests for saving, listing, and deleting roadmaps.

use innings_db::StoreError;
use innings_db::models::{FlowKind, NewRoadmap, RoadmapQuery};
use innings_test_utils::{base_time, create_test_store, sample_roadmap};

#[tokio::test]
async fn add_assigns_increasing_ids() {
    let t = create_test_store().await;

    let a = t.store.add_roadmap(&sample_roadmap(FlowKind::Discovery, "Cricket", 0)).await.unwrap();
    let b = t.store.add_roadmap(&sample_roadmap(FlowKind::Pivot, "Hockey", 1)).await.unwrap();
    let c = t.store.add_roadmap(&sample_roadmap(FlowKind::Discovery, "Tennis", 2)).await.unwrap();

    assert!(a < b && b < c, "ids should increase: {a}, {b}, {c}");
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
    let t = create_test_store().await;

    let first = t.store.add_roadmap(&sample_roadmap(FlowKind::Pivot, "Football", 0)).await.unwrap();
    t.store.delete_roadmap(first).await.unwrap();
    let second = t.store.add_roadmap(&sample_roadmap(FlowKind::Pivot, "Football", 1)).await.unwrap();

    assert!(second > first);
}

#[tokio::test]
async fn stored_record_round_trips() {
    let t = create_test_store().await;
    let record = sample_roadmap(FlowKind::Discovery, "Badminton", 5);

    let id = t.store.add_roadmap(&record).await.unwrap();
    let roadmap = t.store.get_roadmap(id).await.unwrap().expect("saved roadmap");

    assert_eq!(roadmap.id, id);
    assert_eq!(roadmap.flow, FlowKind::Discovery);
    assert_eq!(roadmap.sport, "Badminton");
    assert_eq!(roadmap.title, record.title);
    assert_eq!(roadmap.summary, record.summary);
    assert_eq!(roadmap.full_content, record.full_content);
    assert_eq!(roadmap.created_at, record.created_at);
}

#[tokio::test]
async fn malformed_record_is_rejected_without_writing() {
    let t = create_test_store().await;

    let mut record = sample_roadmap(FlowKind::Pivot, "Cricket", 0);
    record.full_content = "  ".to_string();

    let err = t.store.add_roadmap(&record).await.unwrap_err();
    assert!(
        matches!(err, StoreError::InvalidRecord { field: "full_content" }),
        "unexpected error: {err}"
    );

    let blank_title = NewRoadmap::new(FlowKind::Discovery, "Cricket", "", "goal", "{}");
    let err = t.store.add_roadmap(&blank_title).await.unwrap_err();
    assert!(matches!(err, StoreError::InvalidRecord { field: "title" }));

    let all = t.store.list_roadmaps(&RoadmapQuery::all()).await.unwrap();
    assert!(all.is_empty(), "nothing should have been written");
}

#[tokio::test]
async fn delete_is_idempotent() {
    let t = create_test_store().await;
    let keep = t.store.add_roadmap(&sample_roadmap(FlowKind::Discovery, "Cricket", 0)).await.unwrap();
    let gone = t.store.add_roadmap(&sample_roadmap(FlowKind::Discovery, "Cricket", 1)).await.unwrap();

    t.store.delete_roadmap(gone).await.expect("first delete");
    let after_first = t.store.list_roadmaps(&RoadmapQuery::all()).await.unwrap();

    t.store.delete_roadmap(gone).await.expect("second delete is a no-op");
    let after_second = t.store.list_roadmaps(&RoadmapQuery::all()).await.unwrap();

    assert_eq!(after_first, after_second);
    assert_eq!(after_second.len(), 1);
    assert_eq!(after_second[0].id, keep);

    // A never-issued id is fine too.
    t.store.delete_roadmap(9_999).await.unwrap();
}

#[tokio::test]
async fn list_orders_by_creation_time() {
    let t = create_test_store().await;
    // Inserted out of chronological order on purpose.
    t.store.add_roadmap(&sample_roadmap(FlowKind::Discovery, "Middle", 10)).await.unwrap();
    t.store.add_roadmap(&sample_roadmap(FlowKind::Discovery, "Newest", 20)).await.unwrap();
    t.store.add_roadmap(&sample_roadmap(FlowKind::Discovery, "Oldest", 0)).await.unwrap();

    let newest_first: Vec<String> = t
        .store
        .list_roadmaps(&RoadmapQuery::all())
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.sport)
        .collect();
    assert_eq!(newest_first, vec!["Newest", "Middle", "Oldest"]);

    let oldest_first: Vec<String> = t
        .store
        .list_roadmaps(&RoadmapQuery::all().oldest_first())
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.sport)
        .collect();
    assert_eq!(oldest_first, vec!["Oldest", "Middle", "Newest"]);
}

#[tokio::test]
async fn same_timestamp_falls_back_to_id() {
    let t = create_test_store().await;
    let mut a = sample_roadmap(FlowKind::Pivot, "A", 0);
    let mut b = sample_roadmap(FlowKind::Pivot, "B", 0);
    a.created_at = base_time();
    b.created_at = base_time();
    t.store.add_roadmap(&a).await.unwrap();
    t.store.add_roadmap(&b).await.unwrap();

    let sports: Vec<String> = t
        .store
        .list_roadmaps(&RoadmapQuery::all())
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.sport)
        .collect();
    assert_eq!(sports, vec!["B", "A"]);
}

#[tokio::test]
async fn list_filters_by_flow_and_sport() {
    let t = create_test_store().await;
    t.store.add_roadmap(&sample_roadmap(FlowKind::Discovery, "Cricket", 0)).await.unwrap();
    t.store.add_roadmap(&sample_roadmap(FlowKind::Pivot, "Cricket", 1)).await.unwrap();
    t.store.add_roadmap(&sample_roadmap(FlowKind::Pivot, "Hockey", 2)).await.unwrap();

    let pivots = t
        .store
        .list_roadmaps(&RoadmapQuery::all().with_flow(FlowKind::Pivot))
        .await
        .unwrap();
    assert_eq!(pivots.len(), 2);
    assert!(pivots.iter().all(|r| r.flow == FlowKind::Pivot));

    let cricket = t
        .store
        .list_roadmaps(&RoadmapQuery::all().with_sport("Cricket"))
        .await
        .unwrap();
    assert_eq!(cricket.len(), 2);

    let cricket_pivot = t
        .store
        .list_roadmaps(&RoadmapQuery::all().with_flow(FlowKind::Pivot).with_sport("Cricket"))
        .await
        .unwrap();
    assert_eq!(cricket_pivot.len(), 1);

    let count = t
        .store
        .count_roadmaps(&RoadmapQuery::all().with_flow(FlowKind::Discovery))
        .await
        .unwrap();
    assert_eq!(count, 1);
    assert_eq!(t.store.count_roadmaps(&RoadmapQuery::all()).await.unwrap(), 3);
}

#[tokio::test]
async fn data_survives_reopening_the_file() {
    let t = create_test_store().await;
    let id = t.store.add_roadmap(&sample_roadmap(FlowKind::Pivot, "Athletics", 0)).await.unwrap();
    t.store.close().await;

    let reopened = innings_db::open_store(&t.config).await.expect("reopen");
    let roadmap = reopened.get_roadmap(id).await.unwrap();
    assert_eq!(roadmap.map(|r| r.sport), Some("Athletics".to_string()));
}
