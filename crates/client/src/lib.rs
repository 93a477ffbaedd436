//! Remote catalog access.
//!
//! This crate provides:
//! - `CatalogSource` trait for anything that can list and fetch records
//! - `PokeApiClient`, the reqwest-backed implementation
//! - `CachedSource`, which routes detail fetches through the record cache
//! - `load_catalog`, the bounded-concurrency bulk loader

pub mod cached;
pub mod error;
pub mod loader;
pub mod pokeapi;
pub mod source;

pub use cached::CachedSource;
pub use error::NetworkError;
pub use loader::{load_catalog, LoadProgress, LoadReport};
pub use pokeapi::PokeApiClient;
pub use source::CatalogSource;
