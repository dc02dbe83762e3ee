use serde::{Deserialize, Serialize};

use super::Mode;

/// One ranked chart peak: a guess value and which mode dominates it.
///
/// Peaks exist only to place chart annotations; they carry no further state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeakLabel {
    pub guess: i64,
    /// Solo when the solo count is at least the social count, else social.
    pub dominant_mode: Mode,
    /// Solo plus social count at this value.
    pub combined: u64,
}
