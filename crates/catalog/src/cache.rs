use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use pokedex_core::Pokemon;
use tokio::sync::{Mutex, OnceCell};
use tracing::debug;

type Slot = Arc<OnceCell<Arc<Pokemon>>>;

/// Process-lifetime record cache keyed by name.
///
/// Entries are never evicted or invalidated. Each key owns a single
/// [`OnceCell`] slot, so concurrent [`get_or_fetch`](Self::get_or_fetch)
/// calls for the same name share one fetch and observe the same `Arc`.
#[derive(Default)]
pub struct RecordCache {
    slots: Mutex<HashMap<String, Slot>>,
}

impl RecordCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached record for `name`, if a fetch for it has completed.
    pub async fn get(&self, name: &str) -> Option<Arc<Pokemon>> {
        let slots = self.slots.lock().await;
        slots.get(name).and_then(|slot| slot.get().cloned())
    }

    /// Store a record. The first completed value for a key wins; the
    /// returned `Arc` is whatever the cache now holds.
    pub async fn put(&self, name: &str, record: Arc<Pokemon>) -> Arc<Pokemon> {
        let slot = self.slot(name).await;
        if slot.set(record.clone()).is_err() {
            debug!(name, "cache slot already filled, keeping existing record");
        }
        slot.get().cloned().unwrap_or(record)
    }

    /// Return the cached record or run `fetch` to fill the slot.
    ///
    /// While a fetch for `name` is in flight, other callers wait for it
    /// instead of issuing their own. A failed fetch leaves the slot empty
    /// so the next caller retries.
    pub async fn get_or_fetch<F, Fut, E>(&self, name: &str, fetch: F) -> Result<Arc<Pokemon>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Pokemon, E>>,
    {
        let slot = self.slot(name).await;
        if let Some(hit) = slot.get() {
            debug!(name, "cache hit");
            return Ok(hit.clone());
        }
        slot.get_or_try_init(|| async move { fetch().await.map(Arc::new) })
            .await
            .cloned()
    }

    /// Number of completed entries.
    pub async fn len(&self) -> usize {
        let slots = self.slots.lock().await;
        slots.values().filter(|slot| slot.initialized()).count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn slot(&self, name: &str) -> Slot {
        let mut slots = self.slots.lock().await;
        slots
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use pokedex_core::PokemonType;

    fn pikachu() -> Pokemon {
        Pokemon {
            id: 25,
            name: "pikachu".into(),
            types: vec![PokemonType::Electric],
            weight: 60,
            height: 4,
            sprite_url: None,
            base_experience: Some(112),
            stats: vec![],
        }
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let cache = RecordCache::new();
        assert!(cache.get("pikachu").await.is_none());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn put_then_get_returns_same_arc() {
        let cache = RecordCache::new();
        let record = Arc::new(pikachu());
        let stored = cache.put("pikachu", record.clone()).await;
        assert!(Arc::ptr_eq(&stored, &record));
        let hit = cache.get("pikachu").await.unwrap();
        assert!(Arc::ptr_eq(&hit, &record));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn first_put_wins() {
        let cache = RecordCache::new();
        let first = cache.put("pikachu", Arc::new(pikachu())).await;
        let second = cache.put("pikachu", Arc::new(pikachu())).await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn sequential_fetches_hit_network_once() {
        let cache = RecordCache::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let fetch = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(pikachu())
        };
        let a = cache.get_or_fetch("pikachu", fetch).await.unwrap();
        let b = cache.get_or_fetch("pikachu", fetch).await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_fetches_are_deduplicated() {
        let cache = RecordCache::new();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let fetch = move || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            Ok::<_, String>(pikachu())
        };
        let (a, b) = tokio::join!(
            cache.get_or_fetch("pikachu", fetch),
            cache.get_or_fetch("pikachu", fetch)
        );
        assert!(Arc::ptr_eq(&a.unwrap(), &b.unwrap()));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_retried() {
        let cache = RecordCache::new();
        let err = cache
            .get_or_fetch("pikachu", || async { Err::<Pokemon, _>("boom".to_string()) })
            .await;
        assert_eq!(err.unwrap_err(), "boom");
        assert!(cache.get("pikachu").await.is_none());

        let ok = cache
            .get_or_fetch("pikachu", || async { Ok::<_, String>(pikachu()) })
            .await
            .unwrap();
        assert_eq!(ok.id, 25);
        assert_eq!(cache.len().await, 1);
    }
}
