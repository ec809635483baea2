use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::{HealthStatus, MaintenanceItem, MotorbikeState};
use crate::services::health_evaluator::evaluate_with;
use crate::value_objects::{HealthLevel, TieBreak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttentionSummary {
    pub critical: usize,
    pub warning: usize,
    pub good: usize,
}

impl AttentionSummary {
    pub fn requires_attention(&self) -> bool {
        self.critical > 0 || self.warning > 0
    }
}

/// Health of every item, recomputed from the state's odometer and `now`.
pub fn evaluate_all(
    state: &MotorbikeState,
    now: DateTime<Utc>,
    tie_break: TieBreak,
) -> Vec<(&MaintenanceItem, HealthStatus)> {
    state
        .maintenance_items
        .iter()
        .map(|item| (item, evaluate_with(item, state.current_odo, now, tie_break)))
        .collect()
}

pub fn attention_summary(state: &MotorbikeState, now: DateTime<Utc>, tie_break: TieBreak) -> AttentionSummary {
    let mut summary = AttentionSummary::default();
    for (_, health) in evaluate_all(state, now, tie_break) {
        match health.status {
            HealthLevel::Critical => summary.critical += 1,
            HealthLevel::Warning => summary.warning += 1,
            HealthLevel::Good => summary.good += 1,
        }
    }
    summary
}
