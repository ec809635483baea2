// Health status entity
// Derived on demand, never stored

use serde::{Deserialize, Serialize};

use crate::value_objects::HealthLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemainingUnit {
    Km,
    Months,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Remaining life in percent, clamped to `0..=100`.
    pub percentage: f64,
    pub status: HealthLevel,
    /// Signed remaining quantity; negative once overdue.
    pub remaining: i64,
    pub unit: RemainingUnit,
}

impl HealthStatus {
    pub fn fully_healthy() -> Self {
        Self {
            percentage: 100.0,
            status: HealthLevel::Good,
            remaining: 0,
            unit: RemainingUnit::None,
        }
    }

    /// Percentage rounded to two decimals, the precision shown to users.
    pub fn rounded_percentage(&self) -> f64 {
        (self.percentage * 100.0).round() / 100.0
    }
}
