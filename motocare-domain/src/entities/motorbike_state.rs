// Motorbike state aggregate

use serde::{Deserialize, Serialize};

use crate::entities::{MaintenanceItem, MaintenanceRegistry, ServiceLog};
use crate::value_objects::ItemId;

pub const DEFAULT_MODEL_NAME: &str = "My Daily Ride";

/// Aggregate root for one account. Transitions always build a new value;
/// see `services::service_recorder`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MotorbikeState {
    pub model_name: String,
    pub current_odo: u32,
    pub maintenance_items: MaintenanceRegistry,
    /// Newest first.
    #[serde(default)]
    pub history: Vec<ServiceLog>,
}

impl MotorbikeState {
    pub fn new(model_name: impl Into<String>, maintenance_items: MaintenanceRegistry) -> Self {
        Self {
            model_name: model_name.into(),
            current_odo: 0,
            maintenance_items,
            history: Vec::new(),
        }
    }

    pub fn item(&self, id: &ItemId) -> Option<&MaintenanceItem> {
        self.maintenance_items.get(id)
    }
}
