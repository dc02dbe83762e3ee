//! Chart model and pluggable renderers.
//!
//! The pipeline produces one renderer-independent [`ChartSpec`]; the two
//! renderer implementations (SVG and PNG) consume it behind the same
//! [`ChartRenderer`] interface.

pub mod chart;
mod glyphs;
mod pixel_text;
pub mod series;

pub use chart::{PngRenderer, SvgRenderer};
pub use series::{series_pair, table_from_series, SeriesPoint};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{FrequencyTable, Mode, PeakLabel};

/// Chart rendering failures.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart drawing failed: {0}")]
    Draw(String),

    #[error("image encoding failed: {0}")]
    Encode(String),

    /// A series being decoded does not cover the domain exactly.
    #[error("invalid chart series: {0}")]
    InvalidSeries(String),
}

/// One text label placed just above the taller curve at a peak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub x: i64,
    pub y: u64,
    pub text: String,
    /// Which mode dominates the peak; controls the label color.
    pub mode: Mode,
}

/// Renderer-independent chart content: both line series over the full
/// domain plus the peak annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub solo: Vec<SeriesPoint>,
    pub social: Vec<SeriesPoint>,
    pub annotations: Vec<Annotation>,
}

impl ChartSpec {
    /// Assemble series and annotations from a table and its ranked peaks.
    ///
    /// Each label sits one unit above the higher of the two curves at the
    /// peak's x-position and reads as the guess value itself.
    pub fn from_table(table: &FrequencyTable, peaks: &[PeakLabel]) -> Self {
        let (solo, social) = series_pair(table);
        let annotations = peaks
            .iter()
            .map(|peak| {
                let (solo_count, social_count) = table.counts_at(peak.guess).unwrap_or((0, 0));
                Annotation {
                    x: peak.guess,
                    y: solo_count.max(social_count) + 1,
                    text: peak.guess.to_string(),
                    mode: peak.dominant_mode,
                }
            })
            .collect();
        Self {
            solo,
            social,
            annotations,
        }
    }
}

/// A rendering sink for chart specs.
pub trait ChartRenderer: Send + Sync {
    /// MIME type of the bytes produced by [`render`](Self::render).
    fn content_type(&self) -> &'static str;

    fn render(&self, spec: &ChartSpec) -> Result<Vec<u8>, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_sits_above_taller_curve() {
        let mut table = FrequencyTable::new();
        for _ in 0..3 {
            table.record(100, Mode::Solo);
        }
        table.record(100, Mode::Social);

        let peaks = [PeakLabel {
            guess: 100,
            dominant_mode: Mode::Solo,
            combined: 4,
        }];
        let spec = ChartSpec::from_table(&table, &peaks);

        assert_eq!(spec.annotations.len(), 1);
        let label = &spec.annotations[0];
        assert_eq!(label.x, 100);
        assert_eq!(label.y, 4);
        assert_eq!(label.text, "100");
        assert_eq!(label.mode, Mode::Solo);
    }
}
