// Request and response shapes shared by the interfaces

use motocare_domain::{
    parse_odometer, AttentionSummary, DomainError, HealthStatus, MaintenanceItem, MotorbikeState,
    ServiceLog, SnapshotEnvelope,
};
use serde::{Deserialize, Serialize};

/// Odometer as typed by the user: either a JSON number or the raw text of
/// the input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OdometerInput {
    Number(serde_json::Number),
    Text(String),
}

impl OdometerInput {
    pub fn to_reading(&self) -> Result<u32, DomainError> {
        match self {
            OdometerInput::Number(number) => number
                .as_u64()
                .and_then(|value| u32::try_from(value).ok())
                .ok_or_else(|| {
                    DomainError::InvalidInput(format!("odometer {} is not a valid reading", number))
                }),
            OdometerInput::Text(raw) => parse_odometer(raw),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OdometerUpdateRequest {
    pub odometer: OdometerInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OdometerUpdateResponse {
    pub accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub snapshot: SnapshotEnvelope,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceRecordRequest {
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotPutRequest {
    pub state: MotorbikeState,
    #[serde(default)]
    pub updated_by: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemHealthView {
    #[serde(flatten)]
    pub item: MaintenanceItem,
    pub health: HealthStatus,
    pub presentation_hint: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub model_name: String,
    pub current_odo: u32,
    pub revision: u64,
    pub attention: AttentionSummary,
    pub requires_attention: bool,
    pub items: Vec<ItemHealthView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryView {
    pub total: usize,
    pub entries: Vec<ServiceLog>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdviceResponse {
    pub advice: String,
    /// True when the text is the static fallback rather than generated.
    pub fallback: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> OdometerInput {
        serde_json::from_str::<OdometerUpdateRequest>(json)
            .expect("request")
            .odometer
    }

    #[test]
    fn accepts_numbers_and_numeric_text() {
        assert_eq!(parse(r#"{"odometer": 12500}"#).to_reading(), Ok(12_500));
        assert_eq!(parse(r#"{"odometer": " 12500 "}"#).to_reading(), Ok(12_500));
    }

    #[test]
    fn rejects_negative_fractional_and_text() {
        for json in [
            r#"{"odometer": -1}"#,
            r#"{"odometer": 12.5}"#,
            r#"{"odometer": "twelve"}"#,
            r#"{"odometer": 99999999999}"#,
        ] {
            assert!(parse(json).to_reading().is_err(), "{json}");
        }
    }
}
