//! Time-window and validity filtering.

use crate::models::{Dataset, FilterCriteria};

/// Apply `criteria` to `dataset`, preserving record order.
///
/// Pure: the input is untouched. Applying the same criteria to the output
/// returns it unchanged, and an empty input yields an empty output.
pub fn filter_dataset(dataset: &Dataset, criteria: &FilterCriteria) -> Dataset {
    let records = dataset
        .records()
        .iter()
        .filter(|record| criteria.matches(record))
        .copied()
        .collect();
    Dataset::from_sorted(records)
}
