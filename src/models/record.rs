use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Mode;

/// One guess observation from the feed.
///
/// Records are immutable once created; a new fetch replaces the whole
/// snapshot rather than merging into it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GuessRecord {
    /// The integer value guessed.
    pub guess: i64,
    /// Submission context (solo/social/unknown).
    pub mode: Mode,
    /// Submission time, millisecond resolution.
    pub timestamp: DateTime<Utc>,
}

impl GuessRecord {
    pub fn new(guess: i64, mode: Mode, timestamp: DateTime<Utc>) -> Self {
        Self {
            guess,
            mode,
            timestamp,
        }
    }
}
