//! Process-wide snapshot cache with a time-to-live.
//!
//! One fetch is memoized for a bounded window. The cache holds a single
//! immutable snapshot behind an `Arc` and swaps the reference on refresh,
//! so concurrent readers never observe a half-updated dataset.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tokio::sync::Mutex;
use tracing::{debug, info};

use super::checksum::dataset_checksum;
use super::error::FeedError;
use super::GuessFeed;
use crate::models::Dataset;

/// One cached fetch result.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub dataset: Dataset,
    /// Wall-clock fetch time, for display.
    pub fetched_at: DateTime<Utc>,
    /// Monotonic fetch time, for TTL arithmetic.
    fetched_instant: Instant,
    /// SHA-256 over the normalized records.
    pub checksum: String,
}

impl Snapshot {
    pub fn age(&self) -> Duration {
        self.fetched_instant.elapsed()
    }
}

/// TTL cache around a [`GuessFeed`].
pub struct DatasetCache {
    feed: Arc<dyn GuessFeed>,
    ttl: Duration,
    current: RwLock<Option<Arc<Snapshot>>>,
    /// Serializes refreshes so concurrent misses collapse into one fetch.
    refresh_lock: Mutex<()>,
}

impl DatasetCache {
    pub fn new(feed: Arc<dyn GuessFeed>, ttl: Duration) -> Self {
        Self {
            feed,
            ttl,
            current: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The current snapshot, fetching first if the cache is empty or expired.
    ///
    /// A fetch failure propagates; an expired snapshot is never served in
    /// its place, though it stays cached for the next attempt.
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, FeedError> {
        if let Some(snapshot) = self.fresh() {
            debug!(age_secs = snapshot.age().as_secs(), "serving cached snapshot");
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;
        // Another task may have refreshed while this one waited on the lock.
        if let Some(snapshot) = self.fresh() {
            return Ok(snapshot);
        }
        self.fetch_and_swap().await
    }

    /// Fetch regardless of the TTL, replacing the current snapshot.
    pub async fn refresh(&self) -> Result<Arc<Snapshot>, FeedError> {
        let _guard = self.refresh_lock.lock().await;
        self.fetch_and_swap().await
    }

    /// The cached snapshot, if any, without triggering a fetch.
    pub fn peek(&self) -> Option<Arc<Snapshot>> {
        self.current.read().clone()
    }

    fn fresh(&self) -> Option<Arc<Snapshot>> {
        self.current
            .read()
            .as_ref()
            .filter(|snapshot| snapshot.age() < self.ttl)
            .cloned()
    }

    async fn fetch_and_swap(&self) -> Result<Arc<Snapshot>, FeedError> {
        let dataset = self.feed.fetch().await?;
        let checksum = dataset_checksum(&dataset);
        let unchanged = self
            .peek()
            .map(|prev| prev.checksum == checksum)
            .unwrap_or(false);

        let snapshot = Arc::new(Snapshot {
            fetched_at: Utc::now(),
            fetched_instant: Instant::now(),
            checksum,
            dataset,
        });
        *self.current.write() = Some(Arc::clone(&snapshot));

        info!(
            records = snapshot.dataset.len(),
            unchanged, "feed snapshot refreshed"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::StaticGuessFeed;
    use crate::models::{GuessRecord, Mode};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn record(guess: i64, millis: i64) -> GuessRecord {
        GuessRecord::new(
            guess,
            Mode::Solo,
            Utc.timestamp_millis_opt(millis).single().unwrap(),
        )
    }

    /// Counts fetches; optionally starts failing after a number of calls.
    struct CountingFeed {
        calls: AtomicUsize,
        fail_after: Option<usize>,
    }

    impl CountingFeed {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_after: None,
            }
        }

        fn failing_after(calls: usize) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail_after: Some(calls),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GuessFeed for CountingFeed {
        async fn fetch(&self) -> Result<Dataset, FeedError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(limit) = self.fail_after {
                if call >= limit {
                    return Err(FeedError::Malformed("store went away".to_string()));
                }
            }
            Ok(Dataset::from_unsorted(vec![record(42, 100)]))
        }
    }

    #[tokio::test]
    async fn test_snapshot_reused_within_ttl() {
        let feed = Arc::new(CountingFeed::new());
        let cache = DatasetCache::new(feed.clone(), Duration::from_secs(60));

        let first = cache.snapshot().await.unwrap();
        let second = cache.snapshot().await.unwrap();
        assert_eq!(feed.calls(), 1);
        assert_eq!(first.checksum, second.checksum);
    }

    #[tokio::test]
    async fn test_expired_snapshot_refetches() {
        let feed = Arc::new(CountingFeed::new());
        let cache = DatasetCache::new(feed.clone(), Duration::ZERO);

        cache.snapshot().await.unwrap();
        cache.snapshot().await.unwrap();
        assert_eq!(feed.calls(), 2);
    }

    #[tokio::test]
    async fn test_refresh_bypasses_ttl() {
        let feed = Arc::new(CountingFeed::new());
        let cache = DatasetCache::new(feed.clone(), Duration::from_secs(60));

        cache.snapshot().await.unwrap();
        cache.refresh().await.unwrap();
        assert_eq!(feed.calls(), 2);
    }

    #[tokio::test]
    async fn test_concurrent_misses_collapse_into_one_fetch() {
        let feed = Arc::new(CountingFeed::new());
        let cache = DatasetCache::new(feed.clone(), Duration::from_secs(60));

        let (a, b, c) = tokio::join!(cache.snapshot(), cache.snapshot(), cache.snapshot());
        assert!(a.is_ok() && b.is_ok() && c.is_ok());
        assert_eq!(feed.calls(), 1);
    }

    #[tokio::test]
    async fn test_fetch_error_propagates() {
        let feed = Arc::new(CountingFeed::failing_after(0));
        let cache = DatasetCache::new(feed, Duration::from_secs(60));

        assert!(cache.snapshot().await.is_err());
        assert!(cache.peek().is_none());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_snapshot_cached() {
        let feed = Arc::new(CountingFeed::failing_after(1));
        let cache = DatasetCache::new(feed, Duration::ZERO);

        let first = cache.snapshot().await.unwrap();
        assert!(cache.snapshot().await.is_err());
        let kept = cache.peek().unwrap();
        assert_eq!(kept.checksum, first.checksum);
    }

    #[tokio::test]
    async fn test_static_feed_roundtrip() {
        let feed = Arc::new(StaticGuessFeed::new(vec![record(20, 300), record(30, 100)]));
        let cache = DatasetCache::new(feed, Duration::from_secs(60));

        let snapshot = cache.snapshot().await.unwrap();
        assert_eq!(snapshot.dataset.len(), 2);
        // Sorted ascending regardless of feed order.
        assert_eq!(snapshot.dataset.records()[0].guess, 30);
    }
}
