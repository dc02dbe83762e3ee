//! Lossless encoding between the frequency table and chart series.

use serde::{Deserialize, Serialize};

use super::RenderError;
use crate::models::{FrequencyTable, DOMAIN_MIN, DOMAIN_SIZE};

/// One chart point: guess value on x, count on y.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub x: i64,
    pub y: u64,
}

/// Encode the dense table into `(solo, social)` series, ascending by x.
///
/// Every domain value becomes exactly one point per series; counts are
/// carried verbatim, so [`table_from_series`] inverts this exactly.
pub fn series_pair(table: &FrequencyTable) -> (Vec<SeriesPoint>, Vec<SeriesPoint>) {
    let mut solo = Vec::with_capacity(DOMAIN_SIZE);
    let mut social = Vec::with_capacity(DOMAIN_SIZE);
    for (guess, solo_count, social_count) in table.iter() {
        solo.push(SeriesPoint {
            x: guess,
            y: solo_count,
        });
        social.push(SeriesPoint {
            x: guess,
            y: social_count,
        });
    }
    (solo, social)
}

/// Decode two series back into a table.
///
/// Each series must cover the domain exactly, in ascending order; anything
/// else is rejected rather than silently rebinned.
pub fn table_from_series(
    solo: &[SeriesPoint],
    social: &[SeriesPoint],
) -> Result<FrequencyTable, RenderError> {
    let solo = column_from_series(solo, "solo")?;
    let social = column_from_series(social, "social")?;
    Ok(FrequencyTable::from_columns(solo, social))
}

fn column_from_series(series: &[SeriesPoint], name: &str) -> Result<Vec<u64>, RenderError> {
    if series.len() != DOMAIN_SIZE {
        return Err(RenderError::InvalidSeries(format!(
            "{} series has {} points, expected {}",
            name,
            series.len(),
            DOMAIN_SIZE
        )));
    }
    series
        .iter()
        .enumerate()
        .map(|(idx, point)| {
            let expected = idx as i64 + DOMAIN_MIN;
            if point.x != expected {
                return Err(RenderError::InvalidSeries(format!(
                    "{} series point {} has x {}, expected {}",
                    name, idx, point.x, expected
                )));
            }
            Ok(point.y)
        })
        .collect()
}
