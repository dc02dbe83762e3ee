//! In-memory feed for tests and local development.

use async_trait::async_trait;

use super::error::FeedError;
use super::GuessFeed;
use crate::models::{Dataset, GuessRecord};

/// Feed serving a fixed set of records. Never fails, never changes.
#[derive(Debug, Clone, Default)]
pub struct StaticGuessFeed {
    records: Vec<GuessRecord>,
}

impl StaticGuessFeed {
    pub fn new(records: Vec<GuessRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl GuessFeed for StaticGuessFeed {
    async fn fetch(&self) -> Result<Dataset, FeedError> {
        Ok(Dataset::from_unsorted(self.records.clone()))
    }
}
