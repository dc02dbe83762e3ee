//! End-to-end pipeline tests: feed, cache, filter, aggregation, statistics.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};

use guess_tracker::feed::{DatasetCache, GuessFeed, StaticGuessFeed};
use guess_tracker::models::{FilterCriteria, GuessRecord, Mode, DOMAIN_SIZE};
use guess_tracker::render::{series_pair, table_from_series, ChartSpec};
use guess_tracker::services;

fn record(guess: i64, mode: Mode, millis: i64) -> GuessRecord {
    GuessRecord::new(guess, mode, Utc.timestamp_millis_opt(millis).unwrap())
}

fn seeded_records() -> Vec<GuessRecord> {
    vec![
        record(15, Mode::Solo, 100),
        record(15, Mode::Solo, 200),
        record(16, Mode::Social, 150),
        record(69, Mode::Solo, 300),
    ]
}

fn seeded_cache(records: Vec<GuessRecord>) -> DatasetCache {
    let feed = Arc::new(StaticGuessFeed::new(records)) as Arc<dyn GuessFeed>;
    DatasetCache::new(feed, Duration::from_secs(300))
}

#[tokio::test]
async fn test_pipeline_counts_and_means() {
    let cache = seeded_cache(seeded_records());

    let snapshot = cache.snapshot().await.unwrap();
    assert_eq!(snapshot.dataset.len(), 4);

    let cutoff = Utc.timestamp_millis_opt(300).unwrap();
    let filtered =
        services::filter_dataset(&snapshot.dataset, &FilterCriteria::with_cutoff(cutoff));
    // 69 sits on the exclusion list; the other three records are in range.
    assert_eq!(filtered.len(), 3);

    assert_eq!(services::count_at(&filtered, Mode::Solo, 15), 2);
    assert_eq!(services::count_at(&filtered, Mode::Social, 16), 1);
    assert_eq!(services::count_at(&filtered, Mode::Social, 15), 0);
    assert_eq!(services::count_at(&filtered, Mode::Solo, 69), 0);

    assert_eq!(services::mean_guess(&filtered, Mode::Solo), Some(15.0));
    assert_eq!(services::mean_guess(&filtered, Mode::Social), Some(16.0));
}

#[tokio::test]
async fn test_pipeline_peaks_and_annotations() {
    let cache = seeded_cache(seeded_records());
    let snapshot = cache.snapshot().await.unwrap();
    let filtered = services::filter_dataset(&snapshot.dataset, &FilterCriteria::default());

    let table = services::aggregate(&filtered);
    let peaks = services::select_peaks(&table, 2);

    assert_eq!(peaks[0].guess, 15);
    assert_eq!(peaks[0].combined, 2);
    assert_eq!(peaks[0].dominant_mode, Mode::Solo);
    assert_eq!(peaks[1].guess, 16);
    assert_eq!(peaks[1].dominant_mode, Mode::Social);

    let spec = ChartSpec::from_table(&table, &peaks);
    assert_eq!(spec.solo.len(), DOMAIN_SIZE);
    assert_eq!(spec.social.len(), DOMAIN_SIZE);

    // Labels sit one unit above the taller curve at the peak.
    assert_eq!(spec.annotations[0].text, "15");
    assert_eq!(spec.annotations[0].y, 3);
    assert_eq!(spec.annotations[1].text, "16");
    assert_eq!(spec.annotations[1].y, 2);
}

#[tokio::test]
async fn test_empty_source_reports_no_data() {
    let cache = seeded_cache(Vec::new());
    let snapshot = cache.snapshot().await.unwrap();

    let filtered = services::filter_dataset(&snapshot.dataset, &FilterCriteria::default());
    assert!(filtered.is_empty());

    assert_eq!(services::mean_guess(&filtered, Mode::Solo), None);
    assert_eq!(services::mean_guess(&filtered, Mode::Social), None);
    assert!(services::top_guesses(&filtered, Mode::Solo, 10).is_empty());

    let table = services::aggregate(&filtered);
    assert_eq!(table.iter().count(), DOMAIN_SIZE);
    assert!(table
        .iter()
        .all(|(_, solo, social)| solo == 0 && social == 0));

    // Ranking an all-zero table is still deterministic: ascending values.
    let peaks = services::select_peaks(&table, 5);
    let values: Vec<i64> = peaks.iter().map(|p| p.guess).collect();
    assert_eq!(values, vec![1, 2, 3, 4, 5]);
    assert!(peaks.iter().all(|p| p.combined == 0));
}

#[tokio::test]
async fn test_cutoff_before_all_records_behaves_like_empty_source() {
    let cache = seeded_cache(seeded_records());
    let snapshot = cache.snapshot().await.unwrap();

    let cutoff = Utc.timestamp_millis_opt(50).unwrap();
    let filtered =
        services::filter_dataset(&snapshot.dataset, &FilterCriteria::with_cutoff(cutoff));

    assert!(filtered.is_empty());
    assert_eq!(services::mean_guess(&filtered, Mode::Solo), None);

    let table = services::aggregate(&filtered);
    let peaks = services::select_peaks(&table, 3);
    assert!(peaks.iter().all(|p| p.combined == 0));
}

#[tokio::test]
async fn test_series_round_trip_is_exact() {
    let cache = seeded_cache(seeded_records());
    let snapshot = cache.snapshot().await.unwrap();
    let filtered = services::filter_dataset(&snapshot.dataset, &FilterCriteria::default());

    let table = services::aggregate(&filtered);
    let (solo, social) = series_pair(&table);
    let rebuilt = table_from_series(&solo, &social).unwrap();

    assert_eq!(rebuilt, table);
}

#[tokio::test]
async fn test_snapshot_is_reused_within_ttl() {
    let cache = seeded_cache(seeded_records());

    let first = cache.snapshot().await.unwrap();
    let second = cache.snapshot().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(first.checksum, second.checksum);

    // A forced refresh produces a new snapshot with the same content.
    let refreshed = cache.refresh().await.unwrap();
    assert!(!Arc::ptr_eq(&first, &refreshed));
    assert_eq!(first.checksum, refreshed.checksum);
}
