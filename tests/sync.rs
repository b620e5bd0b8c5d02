//! Pushing tasks to a remote record store

use std::sync::{Arc, Mutex};

use task_manager::cache::Cache;
use task_manager::mock_behaviour::MockBehaviour;
use task_manager::remote::{MemoryRecordStore, Record, RemoteSync};
use task_manager::{Task, Timeframe};

fn task(id: i64, text: &str) -> Task {
    Task::new(id, text.to_string(), None, Timeframe::EndOfWeek)
}

#[tokio::test]
async fn pushes_create_then_replace() {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = Arc::new(MemoryRecordStore::new());
    let sync = RemoteSync::new(store.clone());

    let mut t = task(3, "Return library books");
    sync.push(&t).await.unwrap();
    t.toggle_completion();
    sync.push(&t).await.unwrap();
    sync.push(&task(4, "Fix the bike")).await.unwrap();

    assert_eq!(store.upsert_count(), 3);
    assert_eq!(store.len(), 2);

    let stored = store.get(Record::from_task(&t).id()).unwrap();
    assert_eq!(stored.record_type(), "task");
    assert_eq!(stored.to_task().unwrap(), t);
}

#[tokio::test]
async fn failures_are_swallowed() {
    let _ = env_logger::builder().is_test(true).try_init();
    let behaviour = Arc::new(Mutex::new(MockBehaviour::fail_now(1)));
    let store = Arc::new(MemoryRecordStore::with_behaviour(behaviour));
    let sync = RemoteSync::new(store.clone());

    // The push itself never fails, even though the upsert did
    sync.push(&task(1, "a")).await.unwrap();
    assert_eq!(store.upsert_count(), 1);
    assert!(store.is_empty());

    // And it is not retried
    sync.push(&task(2, "b")).await.unwrap();
    assert_eq!(store.upsert_count(), 2);
    assert_eq!(store.len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn save_and_push_do_not_interfere() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let cache = Cache::new(dir.path());
    let store = Arc::new(MemoryRecordStore::new());
    let sync = RemoteSync::new(store.clone());

    let tasks: Vec<Task> = (1..=20).map(|id| task(id, "shared")).collect();

    let pushes: Vec<_> = tasks.iter().map(|t| sync.push(t)).collect();
    let saved = cache.save(tasks.clone()).await.unwrap();
    for push in pushes {
        push.await.unwrap();
    }

    assert_eq!(saved, 20);
    assert_eq!(cache.load().await.unwrap(), tasks);
    assert_eq!(store.len(), 20);
}

#[tokio::test]
async fn failed_push_does_not_affect_local_snapshot() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let cache = Cache::new(dir.path());
    let store = Arc::new(MemoryRecordStore::with_behaviour(Arc::new(Mutex::new(MockBehaviour::fail_now(10)))));
    let sync = RemoteSync::new(store.clone());

    let t = task(1, "offline");
    let push = sync.push(&t);
    cache.save(vec![t.clone()]).await.unwrap();
    push.await.unwrap();

    assert!(store.is_empty());
    assert_eq!(cache.load().await.unwrap(), vec![t]);
}
