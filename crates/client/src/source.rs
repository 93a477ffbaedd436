use async_trait::async_trait;
use pokedex_core::{IndexEntry, Pokemon};

use crate::error::NetworkError;

/// Anything that can list the catalog and fetch full records.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch the complete list of name/reference pairs.
    async fn load_index(&self) -> Result<Vec<IndexEntry>, NetworkError>;

    /// Fetch one full record.
    async fn fetch_detail(&self, entry: &IndexEntry) -> Result<Pokemon, NetworkError>;

    /// Reference for a record that is not in the index yet.
    fn detail_url(&self, name: &str) -> String;
}
