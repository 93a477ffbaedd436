//! In-memory catalog pipeline: record cache, filter engine, pagination,
//! the coordinating store and the debouncer that feeds it search input.

pub mod cache;
pub mod debounce;
pub mod filter;
pub mod pagination;
pub mod store;
pub mod view;

pub use cache::RecordCache;
pub use debounce::Debouncer;
pub use filter::FilterCriteria;
pub use pagination::{PageInfo, Pagination};
pub use store::{CatalogStore, RenderSink, StatusMessage};
pub use view::{CatalogSnapshot, PokemonDetail, PokemonRow};
