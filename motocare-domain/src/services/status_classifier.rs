use crate::value_objects::HealthLevel;

/// Upper bound (inclusive) of the Warning band.
pub const WARNING_THRESHOLD: f64 = 25.0;

/// Maps a health percentage to its level. Both band edges are inclusive of
/// the more severe level: exactly 0 is Critical, exactly 25 is Warning.
pub fn classify(percentage: f64) -> HealthLevel {
    if percentage.is_nan() || percentage <= 0.0 {
        HealthLevel::Critical
    } else if percentage <= WARNING_THRESHOLD {
        HealthLevel::Warning
    } else {
        HealthLevel::Good
    }
}
