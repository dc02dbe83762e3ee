use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::GuessRecord;

/// Immutable sequence of guess records, ascending by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    records: Vec<GuessRecord>,
}

impl Dataset {
    /// Build a dataset from records in feed order, sorting ascending by
    /// timestamp. The sort is stable, so feed order survives among equal
    /// timestamps.
    pub fn from_unsorted(mut records: Vec<GuessRecord>) -> Self {
        records.sort_by_key(|r| r.timestamp);
        Self { records }
    }

    /// Wrap records already in ascending timestamp order.
    pub(crate) fn from_sorted(records: Vec<GuessRecord>) -> Self {
        debug_assert!(records
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp));
        Self { records }
    }

    pub fn records(&self) -> &[GuessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest timestamps, or `None` for an empty dataset.
    ///
    /// The dashboard uses this for its time-slider bounds, which are simply
    /// undefined without data.
    pub fn time_range(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match (self.records.first(), self.records.last()) {
            (Some(first), Some(last)) => Some((first.timestamp, last.timestamp)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mode;
    use chrono::TimeZone;

    fn record(guess: i64, millis: i64) -> GuessRecord {
        GuessRecord::new(
            guess,
            Mode::Solo,
            Utc.timestamp_millis_opt(millis).single().unwrap(),
        )
    }

    #[test]
    fn test_from_unsorted_orders_by_timestamp() {
        let dataset = Dataset::from_unsorted(vec![record(3, 300), record(1, 100), record(2, 200)]);
        let guesses: Vec<i64> = dataset.records().iter().map(|r| r.guess).collect();
        assert_eq!(guesses, vec![1, 2, 3]);
    }

    #[test]
    fn test_time_range() {
        let dataset = Dataset::from_unsorted(vec![record(1, 500), record(2, 100)]);
        let (first, last) = dataset.time_range().unwrap();
        assert_eq!(first.timestamp_millis(), 100);
        assert_eq!(last.timestamp_millis(), 500);
    }

    #[test]
    fn test_time_range_empty() {
        assert!(Dataset::default().time_range().is_none());
        assert!(Dataset::default().is_empty());
    }
}
