//! Checksum calculation for snapshot change detection.

use sha2::{Digest, Sha256};

use crate::models::Dataset;

/// SHA-256 over a dataset's normalized records, hex-encoded.
///
/// Two fetches with identical records produce identical checksums, which
/// lets the cache log whether a refresh actually changed anything and lets
/// clients skip redundant redraws.
pub fn dataset_checksum(dataset: &Dataset) -> String {
    let mut hasher = Sha256::new();
    for record in dataset.records() {
        hasher.update(record.timestamp.timestamp_millis().to_le_bytes());
        hasher.update(record.guess.to_le_bytes());
        hasher.update(record.mode.as_str().as_bytes());
    }
    hex::encode(hasher.finalize())
}
