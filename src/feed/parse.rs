//! Normalization of raw feed documents into guess records.

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::warn;

use super::error::FeedError;
use crate::models::{GuessRecord, Mode};

/// Raw entry shape as stored in the feed. Everything is optional at the
/// wire level; validation happens during normalization.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(default)]
    guess: Option<serde_json::Number>,
    #[serde(default)]
    version: Option<String>,
    #[serde(default)]
    timestamp: Option<i64>,
}

/// Decode a raw feed document into records, in document order.
///
/// The store returns a JSON object keyed by opaque push ids, or `null` when
/// it holds no entries at all. Individual bad entries are dropped with a
/// warning; a document whose top level is anything else is a hard error.
pub fn parse_document(body: &str) -> Result<Vec<GuessRecord>, FeedError> {
    let document: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FeedError::Malformed(format!("invalid JSON: {}", e)))?;

    let entries = match document {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Object(entries) => entries,
        other => {
            return Err(FeedError::Malformed(format!(
                "expected an object of entries, got {}",
                json_type_name(&other)
            )))
        }
    };

    let total = entries.len();
    let records: Vec<GuessRecord> = entries
        .into_iter()
        .filter_map(|(key, value)| normalize_entry(&key, value))
        .collect();

    let dropped = total - records.len();
    if dropped > 0 {
        warn!(dropped, total, "dropped malformed feed entries");
    }

    Ok(records)
}

fn normalize_entry(key: &str, value: serde_json::Value) -> Option<GuessRecord> {
    let entry: RawEntry = match serde_json::from_value(value) {
        Ok(entry) => entry,
        Err(e) => {
            warn!(key, error = %e, "dropping malformed feed entry");
            return None;
        }
    };

    let Some(guess) = entry.guess.as_ref().and_then(integral_value) else {
        warn!(key, "dropping feed entry without an integral guess");
        return None;
    };

    let Some(timestamp) = entry
        .timestamp
        .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    else {
        warn!(key, "dropping feed entry without a valid timestamp");
        return None;
    };

    let mode = entry
        .version
        .as_deref()
        .map(Mode::from_tag)
        .unwrap_or(Mode::Unknown);

    Some(GuessRecord::new(guess, mode, timestamp))
}

/// Accept integers, and floats that carry an integral value.
fn integral_value(number: &serde_json::Number) -> Option<i64> {
    if let Some(value) = number.as_i64() {
        return Some(value);
    }
    match number.as_f64() {
        Some(value) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => Some(value as i64),
        _ => None,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
