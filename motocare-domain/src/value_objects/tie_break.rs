// Dual-interval tie-break policy

use serde::{Deserialize, Serialize};

/// How an item carrying both a distance and a time interval is evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Distance wins outright; the time interval is never looked at.
    #[default]
    DistanceFirst,
    /// Both axes are evaluated and the lower percentage is reported.
    WorstOf,
}

impl TieBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::DistanceFirst => "distance_first",
            TieBreak::WorstOf => "worst_of",
        }
    }
}

impl From<&str> for TieBreak {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "worst_of" | "worst-of" | "worst" => TieBreak::WorstOf,
            _ => TieBreak::DistanceFirst,
        }
    }
}
