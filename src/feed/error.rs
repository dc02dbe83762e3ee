//! Feed error types.

use std::time::Duration;

use thiserror::Error;

/// Failures while fetching or decoding the guess feed.
///
/// Every variant means the same thing to callers: no usable snapshot. The
/// HTTP layer surfaces them as an explicit error state instead of serving a
/// partial chart.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Network or HTTP-status failure talking to the store.
    #[error("feed request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request exceeded the configured timeout, retries included.
    #[error("feed request timed out after {0:?}")]
    Timeout(Duration),

    /// The document's top-level structure is not an entry object.
    #[error("malformed feed response: {0}")]
    Malformed(String),

    /// Invalid environment configuration.
    #[error("invalid feed configuration: {0}")]
    Config(String),
}
