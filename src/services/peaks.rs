//! Peak selection over the frequency table.

use crate::models::{FrequencyTable, Mode, PeakLabel};

/// Pick the `n` guess values with the largest combined count.
///
/// Returns exactly `min(n, domain size)` labels, descending by combined
/// count with ties broken toward the lower guess value, so the result is
/// deterministic for any table. The dominant mode is solo when the solo
/// count is at least the social count.
pub fn select_peaks(table: &FrequencyTable, n: usize) -> Vec<PeakLabel> {
    let mut ranked: Vec<(i64, u64, u64)> = table.iter().collect();
    ranked.sort_by(|a, b| {
        let combined_a = a.1 + a.2;
        let combined_b = b.1 + b.2;
        combined_b.cmp(&combined_a).then(a.0.cmp(&b.0))
    });

    ranked
        .into_iter()
        .take(n)
        .map(|(guess, solo, social)| PeakLabel {
            guess,
            dominant_mode: if solo >= social { Mode::Solo } else { Mode::Social },
            combined: solo + social,
        })
        .collect()
}
