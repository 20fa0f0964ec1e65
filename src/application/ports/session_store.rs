use async_trait::async_trait;

/// Process-local key/value store shared by the dispatcher (documents) and the
/// chat front end (sessions, language preferences).
///
/// Writes to the same key are last-write-wins; implementations may evict
/// entries, so a `put` never guarantees a later `get` hit.
#[async_trait]
pub trait SessionStore<K, V>: Send + Sync
where
    K: Send + Sync,
    V: Send + Sync,
{
    async fn get(&self, key: &K) -> Option<V>;

    async fn put(&self, key: K, value: V);

    async fn delete(&self, key: &K) -> Option<V>;

    async fn len(&self) -> usize;

    async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
