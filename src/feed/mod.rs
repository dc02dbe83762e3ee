//! Guess feed loading and the process-wide snapshot cache.
//!
//! The remote store is a read-only HTTP endpoint returning one JSON object
//! of entries. A fetch replaces the whole in-memory snapshot; nothing is
//! merged, and nothing is written back.

pub mod cache;
pub mod checksum;
pub mod config;
pub mod error;
pub mod http;
pub mod local;
pub mod parse;

pub use cache::{DatasetCache, Snapshot};
pub use config::FeedConfig;
pub use error::FeedError;
pub use http::HttpGuessFeed;
pub use local::StaticGuessFeed;

use async_trait::async_trait;

use crate::models::Dataset;

/// A source of guess records.
///
/// One `fetch` performs one full load of the store, normalized and sorted
/// ascending by timestamp.
#[async_trait]
pub trait GuessFeed: Send + Sync {
    async fn fetch(&self) -> Result<Dataset, FeedError>;
}
