use thiserror::Error;

/// A fetch that failed in transport, status, or decoding.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned {status}")]
    Status { status: u16, url: String },

    #[error("failed to decode {url}: {message}")]
    Decode { url: String, message: String },
}
