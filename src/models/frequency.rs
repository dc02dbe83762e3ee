use serde::{Deserialize, Serialize};

use super::Mode;

/// First value of the guess domain (inclusive).
pub const DOMAIN_MIN: i64 = 1;
/// End of the guess domain (exclusive).
pub const DOMAIN_END: i64 = 5_000;
/// Number of integers in `[DOMAIN_MIN, DOMAIN_END)`.
pub const DOMAIN_SIZE: usize = (DOMAIN_END - DOMAIN_MIN) as usize;

/// Dense per-value counts for the solo and social modes.
///
/// Every integer in `[1, 5000)` has a cell even when both counts are zero,
/// so chart series have no gaps and peak ranking sees a total order. Cell
/// `i` holds the counts for guess value `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    solo: Vec<u64>,
    social: Vec<u64>,
}

impl FrequencyTable {
    /// All-zero table over the full domain.
    pub fn new() -> Self {
        Self {
            solo: vec![0; DOMAIN_SIZE],
            social: vec![0; DOMAIN_SIZE],
        }
    }

    fn index(guess: i64) -> Option<usize> {
        if (DOMAIN_MIN..DOMAIN_END).contains(&guess) {
            Some((guess - DOMAIN_MIN) as usize)
        } else {
            None
        }
    }

    /// Count one observation. Unknown-mode records and values outside the
    /// domain are ignored.
    pub fn record(&mut self, guess: i64, mode: Mode) {
        let Some(idx) = Self::index(guess) else {
            return;
        };
        match mode {
            Mode::Solo => self.solo[idx] += 1,
            Mode::Social => self.social[idx] += 1,
            Mode::Unknown => {}
        }
    }

    /// `(solo, social)` counts at a value, or `None` outside the domain.
    pub fn counts_at(&self, guess: i64) -> Option<(u64, u64)> {
        Self::index(guess).map(|idx| (self.solo[idx], self.social[idx]))
    }

    /// Iterate `(guess, solo, social)` ascending over the whole domain.
    pub fn iter(&self) -> impl Iterator<Item = (i64, u64, u64)> + '_ {
        self.solo
            .iter()
            .zip(self.social.iter())
            .enumerate()
            .map(|(idx, (&solo, &social))| (idx as i64 + DOMAIN_MIN, solo, social))
    }

    pub fn solo_total(&self) -> u64 {
        self.solo.iter().sum()
    }

    pub fn social_total(&self) -> u64 {
        self.social.iter().sum()
    }

    /// Rebuild from full columns; lengths must match the domain.
    pub(crate) fn from_columns(solo: Vec<u64>, social: Vec<u64>) -> Self {
        debug_assert_eq!(solo.len(), DOMAIN_SIZE);
        debug_assert_eq!(social.len(), DOMAIN_SIZE);
        Self { solo, social }
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_table_covers_whole_domain() {
        let table = FrequencyTable::new();
        assert_eq!(table.iter().count(), DOMAIN_SIZE);
        assert!(table.iter().all(|(_, solo, social)| solo == 0 && social == 0));
        assert_eq!(table.counts_at(DOMAIN_MIN), Some((0, 0)));
        assert_eq!(table.counts_at(DOMAIN_END - 1), Some((0, 0)));
    }

    #[test]
    fn test_record_increments_matching_mode() {
        let mut table = FrequencyTable::new();
        table.record(42, Mode::Solo);
        table.record(42, Mode::Solo);
        table.record(42, Mode::Social);
        assert_eq!(table.counts_at(42), Some((2, 1)));
    }

    #[test]
    fn test_unknown_mode_not_counted() {
        let mut table = FrequencyTable::new();
        table.record(42, Mode::Unknown);
        assert_eq!(table.counts_at(42), Some((0, 0)));
        assert_eq!(table.solo_total() + table.social_total(), 0);
    }

    #[test]
    fn test_out_of_domain_ignored() {
        let mut table = FrequencyTable::new();
        table.record(0, Mode::Solo);
        table.record(5_000, Mode::Solo);
        table.record(-7, Mode::Social);
        assert_eq!(table.solo_total() + table.social_total(), 0);
        assert_eq!(table.counts_at(0), None);
        assert_eq!(table.counts_at(5_000), None);
    }

    #[test]
    fn test_iter_is_ascending_and_dense() {
        let table = FrequencyTable::new();
        let values: Vec<i64> = table.iter().map(|(guess, _, _)| guess).collect();
        assert_eq!(values.first(), Some(&DOMAIN_MIN));
        assert_eq!(values.last(), Some(&(DOMAIN_END - 1)));
        assert!(values.windows(2).all(|w| w[1] == w[0] + 1));
    }
}
