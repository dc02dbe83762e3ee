//! Dense frequency aggregation over the guess domain.

use crate::models::{Dataset, FrequencyTable};

/// Count per-value occurrences of each mode across the whole domain.
///
/// One pass over the records. The filter already removed out-of-domain
/// values, so this is purely a materialization step: unobserved values stay
/// zero-filled, and unknown-mode records land in neither column.
pub fn aggregate(dataset: &Dataset) -> FrequencyTable {
    let mut table = FrequencyTable::new();
    for record in dataset.records() {
        table.record(record.guess, record.mode);
    }
    table
}
