//! Bulk catalog load: index first, then every detail record.
//!
//! Detail fetches run concurrently, bounded by `concurrency`. A record
//! that fails to load is logged and skipped; only an index failure
//! aborts the load.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use pokedex_core::Pokemon;
use tracing::{info, warn};

use crate::cached::CachedSource;
use crate::error::NetworkError;
use crate::source::CatalogSource;

/// Progress after each completed (or failed) detail fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadProgress {
    pub done: usize,
    pub total: usize,
}

/// Outcome of a bulk load.
#[derive(Debug, Clone)]
pub struct LoadReport {
    /// Successfully loaded records, sorted by id.
    pub records: Vec<Arc<Pokemon>>,
    /// Names of index entries whose detail fetch failed.
    pub failed: Vec<String>,
    pub index_size: usize,
}

pub async fn load_catalog<S, F>(
    source: &CachedSource<S>,
    concurrency: usize,
    mut on_progress: F,
) -> Result<LoadReport, NetworkError>
where
    S: CatalogSource,
    F: FnMut(LoadProgress),
{
    let index = source.load_index().await?;
    let total = index.len();
    info!(total, concurrency, "Index loaded, fetching details");

    let mut records = Vec::with_capacity(total);
    let mut failed = Vec::new();
    let mut done = 0usize;

    let mut fetches = stream::iter(index.iter())
        .map(move |entry| async move { (entry, source.fetch_detail(entry).await) })
        .buffer_unordered(concurrency.max(1));

    while let Some((entry, result)) = fetches.next().await {
        match result {
            Ok(pokemon) => records.push(pokemon),
            Err(e) => {
                warn!(name = %entry.name, error = %e, "Skipping record that failed to load");
                failed.push(entry.name.clone());
            }
        }
        done += 1;
        on_progress(LoadProgress { done, total });
    }

    // Completion order is arbitrary; id order is the contract.
    records.sort_by_key(|p| p.id);
    failed.sort();

    info!(
        loaded = records.len(),
        failed = failed.len(),
        "Catalog load finished"
    );

    Ok(LoadReport {
        records,
        failed,
        index_size: total,
    })
}
