//! Per-mode summary statistics and point lookups.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::{Dataset, Mode};

/// One row of a per-mode top-N table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessCount {
    pub guess: i64,
    pub count: u64,
}

/// Arithmetic mean of the guesses submitted in `mode`.
///
/// `None` when no records match; a missing mean must surface as "no data",
/// never as a zero.
pub fn mean_guess(dataset: &Dataset, mode: Mode) -> Option<f64> {
    let mut sum = 0i64;
    let mut count = 0u64;
    for record in dataset.records() {
        if record.mode == mode {
            sum += record.guess;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(sum as f64 / count as f64)
    }
}

/// Exact number of records with this mode and guess value.
///
/// Zero is a perfectly ordinary answer, not an error.
pub fn count_at(dataset: &Dataset, mode: Mode, value: i64) -> u64 {
    dataset
        .records()
        .iter()
        .filter(|r| r.mode == mode && r.guess == value)
        .count() as u64
}

/// The `n` most frequent guesses for one mode, sparse.
///
/// Only observed values appear, so fewer than `n` rows may come back.
/// Ordered descending by count, ties broken toward the lower guess value.
pub fn top_guesses(dataset: &Dataset, mode: Mode, n: usize) -> Vec<GuessCount> {
    let mut counts: HashMap<i64, u64> = HashMap::new();
    for record in dataset.records() {
        if record.mode == mode {
            *counts.entry(record.guess).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<GuessCount> = counts
        .into_iter()
        .map(|(guess, count)| GuessCount { guess, count })
        .collect();
    rows.sort_by(|a, b| b.count.cmp(&a.count).then(a.guess.cmp(&b.guess)));
    rows.truncate(n);
    rows
}
