use chrono::{DateTime, Utc};

use super::GuessRecord;

/// Exclusive lower bound on valid guess values.
pub const MIN_VALID_GUESS: i64 = 10;
/// Exclusive upper bound on valid guess values.
pub const MAX_VALID_GUESS: i64 = 5_000;
/// Joke values rejected outright.
pub const EXCLUDED_GUESSES: [i64; 3] = [69, 420, 80_085];

/// Validity and time-window rules applied before aggregation.
///
/// Filtering with these criteria is pure and order-preserving, and applying
/// it twice yields the same dataset as applying it once.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Keep records at or before this instant; `None` keeps all.
    pub cutoff: Option<DateTime<Utc>>,
    /// Exclusive lower bound on the guess value.
    pub min_valid: i64,
    /// Exclusive upper bound on the guess value.
    pub max_valid: i64,
    /// Values rejected regardless of the range check.
    pub excluded: Vec<i64>,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            cutoff: None,
            min_valid: MIN_VALID_GUESS,
            max_valid: MAX_VALID_GUESS,
            excluded: EXCLUDED_GUESSES.to_vec(),
        }
    }
}

impl FilterCriteria {
    /// Standard validity rules with a time cutoff.
    pub fn with_cutoff(cutoff: DateTime<Utc>) -> Self {
        Self {
            cutoff: Some(cutoff),
            ..Self::default()
        }
    }

    /// Whether a single record survives the filter. Mode is not consulted.
    pub fn matches(&self, record: &GuessRecord) -> bool {
        if let Some(cutoff) = self.cutoff {
            if record.timestamp > cutoff {
                return false;
            }
        }
        record.guess > self.min_valid
            && record.guess < self.max_valid
            && !self.excluded.contains(&record.guess)
    }
}
