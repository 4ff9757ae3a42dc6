//! Behavioural properties of `TaskStore` observed through its public API.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use taskdesk_core::{
    ContactId, ContactPatch, DueDatePatch, NewTask, TaskId, TaskPriority, TaskStatus, TaskUpdate,
};
use taskdesk_store::{SimulatedLatency, StoreError, TaskStore};
use time::macros::datetime;

fn bundled() -> TaskStore {
    TaskStore::with_bundled_seed(Arc::new(taskdesk_store::NoLatency)).expect("bundled seed")
}

fn full_input(title: &str) -> NewTask {
    NewTask {
        title: title.into(),
        description: Some("details".into()),
        status: Some(TaskStatus::InProgress),
        priority: Some(TaskPriority::Low),
        due_date: Some(datetime!(2025-04-01 00:00 UTC)),
        assigned_to: Some("Alex".into()),
        contact_id: Some(ContactId(3)),
    }
}

#[tokio::test]
async fn created_ids_are_distinct_and_increasing() {
    let store = bundled();
    let mut previous: Option<TaskId> = None;
    for n in 0..25 {
        let created = store.create(NewTask::titled(format!("task {n}"))).await.unwrap();
        if let Some(prev) = previous {
            assert!(created.id > prev, "{} must follow {}", created.id, prev);
        }
        previous = Some(created.id);
    }
}

#[tokio::test]
async fn create_then_get_round_trips_every_field() {
    let store = bundled();
    let created = store.create(full_input("Round trip")).await.unwrap();
    let fetched = store.get_by_id(created.id).await.unwrap();
    assert_eq!(fetched, created);

    let by_text = store.get_by_id(created.id.to_string()).await.unwrap();
    assert_eq!(by_text, created);
}

#[tokio::test]
async fn status_update_changes_only_status_and_updated_at() {
    let store = bundled();
    let before = store.get_by_id(1).await.unwrap();
    let after = store
        .update(1, TaskUpdate::status(TaskStatus::Completed))
        .await
        .unwrap();

    assert_eq!(after.status, TaskStatus::Completed);
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(after.id, before.id);
    assert_eq!(after.title, before.title);
    assert_eq!(after.description, before.description);
    assert_eq!(after.priority, before.priority);
    assert_eq!(after.due_date, before.due_date);
    assert_eq!(after.assigned_to, before.assigned_to);
    assert_eq!(after.contact_id, before.contact_id);
    assert_eq!(after.created_at, before.created_at);
}

#[tokio::test]
async fn update_can_clear_nullable_fields() {
    let store = bundled();
    let update = TaskUpdate {
        due_date: Some(DueDatePatch::Clear),
        contact_id: Some(ContactPatch::Clear),
        ..TaskUpdate::default()
    };
    let updated = store.update(1, update).await.unwrap();
    assert_eq!(updated.due_date, None);
    assert_eq!(updated.contact_id, None);
    assert!(store.get_by_contact_id(1).await.unwrap().iter().all(|task| task.id != updated.id));
}

#[tokio::test]
async fn missing_ids_raise_not_found() {
    let store = bundled();
    let missing = TaskId(9_999);

    assert!(matches!(store.get_by_id(missing).await, Err(StoreError::NotFound(id)) if id == missing));
    assert!(matches!(
        store.update(missing, TaskUpdate::default()).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(store.delete(missing).await, Err(StoreError::NotFound(_))));
}

#[tokio::test]
async fn delete_removes_and_returns_previous_record() {
    let store = bundled();
    let before = store.get_by_id(2).await.unwrap();
    let removed = store.delete(2).await.unwrap();
    assert_eq!(removed, before);

    let remaining = store.get_all().await.unwrap();
    assert!(remaining.iter().all(|task| task.id != TaskId(2)));
    assert!(store.delete(2).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn get_all_returns_detached_copies_in_insertion_order() {
    let store = bundled();
    let mut snapshot = store.get_all().await.unwrap();
    let ids: Vec<u64> = snapshot.iter().map(|task| task.id.get()).collect();
    assert_eq!(ids, (1..=8).collect::<Vec<_>>());

    snapshot[0].title = "mutated locally".into();
    snapshot.clear();

    let fresh = store.get_all().await.unwrap();
    assert_eq!(fresh.len(), 8);
    assert_ne!(fresh[0].title, "mutated locally");
}

#[tokio::test]
async fn get_by_contact_id_filters_by_reference() {
    let store = bundled();
    let linked = store.get_by_contact_id("1").await.unwrap();
    let ids: Vec<TaskId> = linked.iter().map(|task| task.id).collect();
    assert_eq!(ids, vec![TaskId(1), TaskId(6)]);
    assert!(store.get_by_contact_id(42).await.unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn simulated_latency_delays_each_operation() {
    let store = TaskStore::with_bundled_seed(Arc::new(SimulatedLatency::default())).unwrap();

    let start = tokio::time::Instant::now();
    store.get_by_id(1).await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(300));

    let start = tokio::time::Instant::now();
    store.create(NewTask::titled("slow")).await.unwrap();
    assert_eq!(start.elapsed(), Duration::from_millis(500));
}

#[tokio::test(start_paused = true)]
async fn faster_reads_complete_before_slower_writes() {
    let store = TaskStore::with_bundled_seed(Arc::new(SimulatedLatency::default())).unwrap();

    let writer = store.clone();
    let creating = tokio::spawn(async move { writer.create(NewTask::titled("late")).await });
    tokio::task::yield_now().await;

    let snapshot = store.get_all().await.unwrap();
    assert!(snapshot.iter().all(|task| task.title != "late"));

    let created = creating.await.unwrap().unwrap();
    let snapshot = store.get_all().await.unwrap();
    assert!(snapshot.iter().any(|task| task.id == created.id));
}

#[tokio::test(start_paused = true)]
async fn abandoned_operations_still_apply() {
    let store = TaskStore::with_bundled_seed(Arc::new(SimulatedLatency::default())).unwrap();

    let abandoned = tokio::time::timeout(Duration::from_millis(100), store.delete(3)).await;
    assert!(abandoned.is_err(), "delete must still be pending after 100ms");

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(store.get_by_id(3).await.unwrap_err().is_not_found());
}
