pub mod config;
pub mod error;
pub mod generation;
pub mod pokemon;

pub use config::Config;
pub use error::*;
pub use generation::Generation;
pub use pokemon::*;
