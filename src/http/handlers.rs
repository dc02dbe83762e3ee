//! HTTP handlers for the REST API.
//!
//! Each handler resolves the cached snapshot, applies the optional time
//! window, and delegates to the aggregation services for the actual
//! computation.

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, LocalResult, TimeZone, Utc};

use super::dto::{
    ChartQuery, ChartResponse, DatasetInfoResponse, ExportQuery, HealthResponse, LookupQuery,
    LookupResponse, ModeSummaryDto, PeaksQuery, PeaksResponse, SummaryResponse, TopGuessesResponse,
    TopQuery, WindowQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::feed::Snapshot;
use crate::models::{Dataset, FilterCriteria, Mode};
use crate::render::{ChartRenderer, ChartSpec, PngRenderer, SvgRenderer};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Peak annotations and top-N rows default to the dashboard's top-10 view.
const DEFAULT_PEAKS: usize = 10;
const DEFAULT_TOP_N: usize = 10;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and report whether
/// a dataset snapshot is already cached.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let cache = match state.cache.peek() {
        Some(_) => "warm".to_string(),
        None => "cold".to_string(),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        cache,
    }))
}

// =============================================================================
// Dataset Snapshot
// =============================================================================

/// GET /v1/dataset
///
/// Metadata for the current snapshot: record count, time bounds for the
/// cutoff control, fetch time, and checksum.
pub async fn dataset_info(State(state): State<AppState>) -> HandlerResult<DatasetInfoResponse> {
    let snapshot = state.cache.snapshot().await?;
    Ok(Json(dataset_info_body(&state, &snapshot)))
}

/// POST /v1/dataset/refresh
///
/// Force a feed refresh regardless of the TTL and return the new snapshot's
/// metadata.
pub async fn refresh_dataset(State(state): State<AppState>) -> HandlerResult<DatasetInfoResponse> {
    let snapshot = state.cache.refresh().await?;
    Ok(Json(dataset_info_body(&state, &snapshot)))
}

fn dataset_info_body(state: &AppState, snapshot: &Snapshot) -> DatasetInfoResponse {
    let (first, last) = match snapshot.dataset.time_range() {
        Some((first, last)) => (
            Some(first.timestamp_millis()),
            Some(last.timestamp_millis()),
        ),
        None => (None, None),
    };

    DatasetInfoResponse {
        record_count: snapshot.dataset.len(),
        first_timestamp_ms: first,
        last_timestamp_ms: last,
        fetched_at: snapshot.fetched_at,
        age_seconds: snapshot.age().as_secs(),
        checksum: snapshot.checksum.clone(),
        ttl_seconds: state.cache.ttl().as_secs(),
    }
}

// =============================================================================
// Chart & Peaks
// =============================================================================

/// GET /v1/chart
///
/// Chart-ready series over the full guess domain plus peak annotations,
/// computed from the windowed dataset.
pub async fn get_chart(
    State(state): State<AppState>,
    Query(query): Query<ChartQuery>,
) -> HandlerResult<ChartResponse> {
    let filtered = windowed_dataset(&state, query.cutoff_ms).await?;
    let spec = chart_spec(&filtered, query.peaks.unwrap_or(DEFAULT_PEAKS));

    Ok(Json(ChartResponse {
        filtered_count: filtered.len(),
        solo: spec.solo,
        social: spec.social,
        annotations: spec.annotations,
    }))
}

/// GET /v1/chart/export
///
/// Render the chart server-side. `format=svg` (default) or `format=png`;
/// the response body is the image itself with a matching content type.
pub async fn export_chart(
    State(state): State<AppState>,
    Query(query): Query<ExportQuery>,
) -> Result<impl IntoResponse, AppError> {
    let renderer: Box<dyn ChartRenderer> = match query.format.as_deref().unwrap_or("svg") {
        "svg" => Box::new(SvgRenderer),
        "png" => Box::new(PngRenderer),
        other => {
            return Err(AppError::BadRequest(format!(
                "unknown export format: {} (expected svg or png)",
                other
            )))
        }
    };

    let filtered = windowed_dataset(&state, query.cutoff_ms).await?;
    let spec = chart_spec(&filtered, query.peaks.unwrap_or(DEFAULT_PEAKS));

    let content_type = renderer.content_type();
    // Rasterizing and encoding are CPU work; keep them off the async workers.
    let bytes = tokio::task::spawn_blocking(move || renderer.render(&spec))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))??;

    Ok(([(header::CONTENT_TYPE, content_type)], bytes))
}

/// GET /v1/peaks
///
/// Ranked peak labels from the windowed dataset.
pub async fn get_peaks(
    State(state): State<AppState>,
    Query(query): Query<PeaksQuery>,
) -> HandlerResult<PeaksResponse> {
    let filtered = windowed_dataset(&state, query.cutoff_ms).await?;
    let table = services::aggregate(&filtered);
    let peaks = services::select_peaks(&table, query.n.unwrap_or(DEFAULT_PEAKS));

    Ok(Json(PeaksResponse { peaks }))
}

// =============================================================================
// Statistics
// =============================================================================

/// GET /v1/summary
///
/// Per-mode record counts and mean guesses over the windowed dataset. Means
/// are `null` when a mode has no records, never zero.
pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<WindowQuery>,
) -> HandlerResult<SummaryResponse> {
    let filtered = windowed_dataset(&state, query.cutoff_ms).await?;

    Ok(Json(SummaryResponse {
        filtered_count: filtered.len(),
        solo: mode_summary(&filtered, Mode::Solo),
        social: mode_summary(&filtered, Mode::Social),
        unknown: mode_summary(&filtered, Mode::Unknown),
    }))
}

/// GET /v1/lookup
///
/// Exact solo and social counts at one guess value. Zero is a valid, common
/// result, not an error.
pub async fn lookup_value(
    State(state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> HandlerResult<LookupResponse> {
    let filtered = windowed_dataset(&state, query.cutoff_ms).await?;

    Ok(Json(LookupResponse {
        value: query.value,
        solo_count: services::count_at(&filtered, Mode::Solo, query.value),
        social_count: services::count_at(&filtered, Mode::Social, query.value),
    }))
}

/// GET /v1/top-guesses
///
/// Sparse per-mode top-N tables ordered by descending count.
pub async fn get_top_guesses(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> HandlerResult<TopGuessesResponse> {
    let filtered = windowed_dataset(&state, query.cutoff_ms).await?;
    let n = query.n.unwrap_or(DEFAULT_TOP_N);

    Ok(Json(TopGuessesResponse {
        solo: services::top_guesses(&filtered, Mode::Solo, n),
        social: services::top_guesses(&filtered, Mode::Social, n),
    }))
}

// =============================================================================
// Shared helpers
// =============================================================================

/// Resolve the cached snapshot and apply the window and validity filter.
async fn windowed_dataset(state: &AppState, cutoff_ms: Option<i64>) -> Result<Dataset, AppError> {
    let cutoff = parse_cutoff(cutoff_ms)?;
    let snapshot = state.cache.snapshot().await?;
    let criteria = match cutoff {
        Some(ts) => FilterCriteria::with_cutoff(ts),
        None => FilterCriteria::default(),
    };
    Ok(services::filter_dataset(&snapshot.dataset, &criteria))
}

fn parse_cutoff(cutoff_ms: Option<i64>) -> Result<Option<DateTime<Utc>>, AppError> {
    match cutoff_ms {
        None => Ok(None),
        Some(ms) => match Utc.timestamp_millis_opt(ms) {
            LocalResult::Single(ts) => Ok(Some(ts)),
            _ => Err(AppError::BadRequest(format!(
                "cutoff_ms out of range: {}",
                ms
            ))),
        },
    }
}

fn chart_spec(filtered: &Dataset, peaks: usize) -> ChartSpec {
    let table = services::aggregate(filtered);
    let ranked = services::select_peaks(&table, peaks);
    ChartSpec::from_table(&table, &ranked)
}

fn mode_summary(dataset: &Dataset, mode: Mode) -> ModeSummaryDto {
    let count = dataset
        .records()
        .iter()
        .filter(|record| record.mode == mode)
        .count() as u64;
    let mean = services::mean_guess(dataset, mode);

    ModeSummaryDto {
        count,
        mean,
        mean_rounded: mean.map(|m| m.round() as i64),
    }
}
