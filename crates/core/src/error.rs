use thiserror::Error;

/// A filter key that does not name a known generation or type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("unknown generation: {0}")]
    UnknownGeneration(String),

    #[error("unknown type: {0}")]
    UnknownType(String),
}
