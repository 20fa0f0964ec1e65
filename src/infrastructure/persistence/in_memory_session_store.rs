use std::collections::HashMap;
use std::hash::Hash;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::application::ports::SessionStore;

/// Bounds applied to an [`InMemorySessionStore`]. Both limits are optional.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvictionPolicy {
    pub ttl: Option<Duration>,
    pub max_entries: Option<usize>,
}

impl EvictionPolicy {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }
}

struct Entry<V> {
    value: V,
    inserted_at: Instant,
}

/// Process-local map behind an async lock. Expired entries are dropped
/// lazily on read and on insert; when full, the oldest insertion goes first.
pub struct InMemorySessionStore<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
    policy: EvictionPolicy,
}

impl<K, V> InMemorySessionStore<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new(policy: EvictionPolicy) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            policy,
        }
    }

    fn is_expired(&self, entry: &Entry<V>, now: Instant) -> bool {
        self.policy
            .ttl
            .is_some_and(|ttl| now.duration_since(entry.inserted_at) >= ttl)
    }

    fn purge_expired(&self, entries: &mut HashMap<K, Entry<V>>, now: Instant) {
        if self.policy.ttl.is_some() {
            entries.retain(|_, entry| !self.is_expired(entry, now));
        }
    }

    fn evict_oldest(entries: &mut HashMap<K, Entry<V>>) -> Option<K> {
        let oldest = entries
            .iter()
            .min_by_key(|(_, entry)| entry.inserted_at)
            .map(|(key, _)| key.clone())?;
        entries.remove(&oldest);
        Some(oldest)
    }
}

impl<K, V> Default for InMemorySessionStore<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(EvictionPolicy::unbounded())
    }
}

#[async_trait]
impl<K, V> SessionStore<K, V> for InMemorySessionStore<K, V>
where
    K: Eq + Hash + Clone + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return None,
                Some(entry) if !self.is_expired(entry, now) => return Some(entry.value.clone()),
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().await;
        if entries
            .get(key)
            .is_some_and(|entry| self.is_expired(entry, now))
        {
            entries.remove(key);
        }
        None
    }

    async fn put(&self, key: K, value: V) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        self.purge_expired(&mut entries, now);

        entries.remove(&key);
        if let Some(max) = self.policy.max_entries {
            while max > 0 && entries.len() >= max {
                if Self::evict_oldest(&mut entries).is_none() {
                    break;
                }
                tracing::debug!(max_entries = max, "Evicted oldest session entry");
            }
        }

        entries.insert(
            key,
            Entry {
                value,
                inserted_at: now,
            },
        );
    }

    async fn delete(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries
            .remove(key)
            .filter(|entry| !self.is_expired(entry, now))
            .map(|entry| entry.value)
    }

    async fn len(&self) -> usize {
        let now = Instant::now();
        let entries = self.entries.read().await;
        entries
            .values()
            .filter(|entry| !self.is_expired(entry, now))
            .count()
    }
}
