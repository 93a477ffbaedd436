use std::sync::Arc;

use pokedex_catalog::RecordCache;
use pokedex_core::{IndexEntry, Pokemon};
use tracing::debug;

use crate::error::NetworkError;
use crate::source::CatalogSource;

/// A [`CatalogSource`] whose detail fetches go through a [`RecordCache`].
///
/// Fetching the same name twice, concurrently or not, issues one
/// request and yields the same `Arc`.
pub struct CachedSource<S> {
    inner: S,
    cache: Arc<RecordCache>,
}

impl<S: CatalogSource> CachedSource<S> {
    pub fn new(inner: S) -> Self {
        Self::with_cache(inner, Arc::new(RecordCache::new()))
    }

    pub fn with_cache(inner: S, cache: Arc<RecordCache>) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &Arc<RecordCache> {
        &self.cache
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub async fn load_index(&self) -> Result<Vec<IndexEntry>, NetworkError> {
        self.inner.load_index().await
    }

    pub async fn fetch_detail(&self, entry: &IndexEntry) -> Result<Arc<Pokemon>, NetworkError> {
        self.cache
            .get_or_fetch(&entry.name, || self.inner.fetch_detail(entry))
            .await
    }

    /// Detail view lookup for a name or dex number that may not be in the
    /// loaded index.
    ///
    /// Records are always cached under their own name. A lookup by number
    /// is fetched directly and then stored under that name, so it shares
    /// the `Arc` of any earlier lookup by name.
    pub async fn fetch_by_name(&self, name: &str) -> Result<Arc<Pokemon>, NetworkError> {
        let key = name.trim().to_lowercase();
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }
        debug!(key = %key, "Fetching record on demand");
        let entry = IndexEntry {
            url: self.inner.detail_url(&key),
            name: key,
        };

        if entry.name.parse::<u32>().is_err() {
            return self.fetch_detail(&entry).await;
        }
        let record = self.inner.fetch_detail(&entry).await?;
        let canonical = record.name.clone();
        Ok(self.cache.put(&canonical, Arc::new(record)).await)
    }
}
