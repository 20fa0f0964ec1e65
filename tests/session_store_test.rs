use std::time::Duration;

use shastra::application::ports::SessionStore;
use shastra::infrastructure::persistence::{EvictionPolicy, InMemorySessionStore};

#[tokio::test]
async fn given_unbounded_store_when_key_written_twice_then_last_write_wins() {
    let store = InMemorySessionStore::<String, u32>::default();

    store.put("doc".to_string(), 1).await;
    store.put("doc".to_string(), 2).await;

    assert_eq!(store.get(&"doc".to_string()).await, Some(2));
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn given_entry_when_deleted_then_returns_value_and_forgets_it() {
    let store = InMemorySessionStore::<String, u32>::default();
    store.put("doc".to_string(), 7).await;

    assert_eq!(store.delete(&"doc".to_string()).await, Some(7));
    assert_eq!(store.get(&"doc".to_string()).await, None);
    assert!(store.is_empty().await);
}

#[tokio::test(start_paused = true)]
async fn given_ttl_when_entry_outlives_it_then_entry_is_gone() {
    let store = InMemorySessionStore::<String, u32>::new(
        EvictionPolicy::unbounded().with_ttl(Duration::from_secs(60)),
    );
    store.put("doc".to_string(), 1).await;

    tokio::time::advance(Duration::from_secs(59)).await;
    assert_eq!(store.get(&"doc".to_string()).await, Some(1));

    tokio::time::advance(Duration::from_secs(2)).await;
    assert_eq!(store.get(&"doc".to_string()).await, None);
    assert_eq!(store.len().await, 0);
}

#[tokio::test(start_paused = true)]
async fn given_ttl_when_entry_rewritten_then_expiry_restarts() {
    let store = InMemorySessionStore::<String, u32>::new(
        EvictionPolicy::unbounded().with_ttl(Duration::from_secs(60)),
    );
    store.put("doc".to_string(), 1).await;

    tokio::time::advance(Duration::from_secs(45)).await;
    store.put("doc".to_string(), 2).await;
    tokio::time::advance(Duration::from_secs(45)).await;

    assert_eq!(store.get(&"doc".to_string()).await, Some(2));
}

#[tokio::test(start_paused = true)]
async fn given_max_entries_when_full_then_oldest_insertion_is_evicted() {
    let store = InMemorySessionStore::<String, u32>::new(
        EvictionPolicy::unbounded().with_max_entries(2),
    );

    store.put("a".to_string(), 1).await;
    tokio::time::advance(Duration::from_millis(10)).await;
    store.put("b".to_string(), 2).await;
    tokio::time::advance(Duration::from_millis(10)).await;
    store.put("c".to_string(), 3).await;

    assert_eq!(store.get(&"a".to_string()).await, None);
    assert_eq!(store.get(&"b".to_string()).await, Some(2));
    assert_eq!(store.get(&"c".to_string()).await, Some(3));
    assert_eq!(store.len().await, 2);
}

#[tokio::test(start_paused = true)]
async fn given_max_entries_when_existing_key_rewritten_then_nothing_is_evicted() {
    let store = InMemorySessionStore::<String, u32>::new(
        EvictionPolicy::unbounded().with_max_entries(2),
    );

    store.put("a".to_string(), 1).await;
    tokio::time::advance(Duration::from_millis(10)).await;
    store.put("b".to_string(), 2).await;
    tokio::time::advance(Duration::from_millis(10)).await;
    store.put("a".to_string(), 10).await;

    assert_eq!(store.get(&"a".to_string()).await, Some(10));
    assert_eq!(store.get(&"b".to_string()).await, Some(2));
}
