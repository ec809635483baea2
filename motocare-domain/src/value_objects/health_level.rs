// Health level value object

use serde::{Deserialize, Serialize};

/// Ordinal severity of an item's health. Ordering follows severity:
/// `Critical < Warning < Good`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HealthLevel {
    Critical,
    Warning,
    Good,
}

impl HealthLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthLevel::Critical => "Critical",
            HealthLevel::Warning => "Warning",
            HealthLevel::Good => "Good",
        }
    }

    /// Styling hint for whatever renders the level.
    pub fn presentation_hint(&self) -> &'static str {
        match self {
            HealthLevel::Critical => "danger",
            HealthLevel::Warning => "attention",
            HealthLevel::Good => "ok",
        }
    }

    pub fn needs_attention(&self) -> bool {
        *self != HealthLevel::Good
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_order_by_severity() {
        assert!(HealthLevel::Critical < HealthLevel::Warning);
        assert!(HealthLevel::Warning < HealthLevel::Good);
        assert_eq!(
            [HealthLevel::Good, HealthLevel::Critical, HealthLevel::Warning]
                .into_iter()
                .min(),
            Some(HealthLevel::Critical)
        );
    }

    #[test]
    fn serializes_as_plain_names() {
        let json = serde_json::to_string(&HealthLevel::Warning).expect("serialize level");
        assert_eq!(json, "\"Warning\"");
    }
}
