use serde::{Deserialize, Serialize};

/// Submission context attached to each guess.
///
/// The feed tags entries with a free-form `version` string; anything other
/// than the two known tags (including a missing tag) maps to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Solo,
    Social,
    Unknown,
}

impl Mode {
    /// Parse a feed `version` tag.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "solo" => Mode::Solo,
            "social" => Mode::Social,
            _ => Mode::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Solo => "solo",
            Mode::Social => "social",
            Mode::Unknown => "unknown",
        }
    }
}
