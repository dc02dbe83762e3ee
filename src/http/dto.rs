//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Pipeline types that already serialize in their wire shape are re-exported
//! rather than duplicated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Re-export existing types that are already serializable
pub use crate::models::{Mode, PeakLabel};
pub use crate::render::{Annotation, SeriesPoint};
pub use crate::services::GuessCount;

/// Response for the health check endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Crate version
    pub version: String,
    /// Cache state: "warm" once a snapshot has been fetched, "cold" before
    pub cache: String,
}

/// Metadata about the current dataset snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetInfoResponse {
    /// Total records in the unfiltered snapshot
    pub record_count: usize,
    /// Earliest record timestamp in epoch milliseconds, if any records exist
    pub first_timestamp_ms: Option<i64>,
    /// Latest record timestamp in epoch milliseconds, if any records exist
    pub last_timestamp_ms: Option<i64>,
    /// Wall-clock time the snapshot was fetched
    pub fetched_at: DateTime<Utc>,
    /// Seconds since the snapshot was fetched
    pub age_seconds: u64,
    /// SHA-256 checksum of the normalized records
    pub checksum: String,
    /// Snapshot time-to-live in seconds
    pub ttl_seconds: u64,
}

/// Query parameters for endpoints that only take the time window.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct WindowQuery {
    /// Keep only records with timestamp <= this epoch-millisecond cutoff
    #[serde(default)]
    pub cutoff_ms: Option<i64>,
}

/// Query parameters for the chart data endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ChartQuery {
    /// Same windowing cutoff as the other data endpoints
    #[serde(default)]
    pub cutoff_ms: Option<i64>,
    /// Number of peak annotations (default: 10)
    #[serde(default)]
    pub peaks: Option<usize>,
}

/// Query parameters for the chart export endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ExportQuery {
    /// Output format: "svg" (default) or "png"
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub cutoff_ms: Option<i64>,
    #[serde(default)]
    pub peaks: Option<usize>,
}

/// Chart-ready series and annotations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    /// Records that survived the window and validity filter
    pub filtered_count: usize,
    /// Dense solo series over the full guess domain
    pub solo: Vec<SeriesPoint>,
    /// Dense social series over the full guess domain
    pub social: Vec<SeriesPoint>,
    /// Peak labels, ranked by combined count
    pub annotations: Vec<Annotation>,
}

/// Query parameters for the peaks endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PeaksQuery {
    #[serde(default)]
    pub cutoff_ms: Option<i64>,
    /// Number of peaks to return (default: 10)
    #[serde(default)]
    pub n: Option<usize>,
}

/// Ranked peak labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeaksResponse {
    pub peaks: Vec<PeakLabel>,
}

/// Count and mean for one mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeSummaryDto {
    /// Records in this mode after filtering
    pub count: u64,
    /// Arithmetic mean of the guesses, absent when the mode has no records
    pub mean: Option<f64>,
    /// Mean rounded to the nearest integer, for display
    pub mean_rounded: Option<i64>,
}

/// Per-mode summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    /// Records that survived the window and validity filter
    pub filtered_count: usize,
    pub solo: ModeSummaryDto,
    pub social: ModeSummaryDto,
    pub unknown: ModeSummaryDto,
}

/// Query parameters for the point lookup endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupQuery {
    /// Guess value to look up
    pub value: i64,
    #[serde(default)]
    pub cutoff_ms: Option<i64>,
}

/// Exact per-mode counts at one guess value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupResponse {
    pub value: i64,
    pub solo_count: u64,
    pub social_count: u64,
}

/// Query parameters for the top-guesses endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TopQuery {
    #[serde(default)]
    pub cutoff_ms: Option<i64>,
    /// Rows per mode (default: 10)
    #[serde(default)]
    pub n: Option<usize>,
}

/// Sparse per-mode top-N tables, each ordered by descending count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopGuessesResponse {
    pub solo: Vec<GuessCount>,
    pub social: Vec<GuessCount>,
}
