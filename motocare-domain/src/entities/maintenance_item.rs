// Maintenance item entity
// One trackable maintenance action and its last-service markers

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ItemId, MaintenanceCategory, ServiceAction};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceItem {
    pub id: ItemId,
    pub category: MaintenanceCategory,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_km: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interval_months: Option<i32>,
    pub description: String,
    pub action: ServiceAction,
    pub last_service_odo: u32,
    pub last_service_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_oil_count: Option<u32>,
    /// When set, every recorded service bumps `engine_oil_count`.
    #[serde(default)]
    pub tracks_service_count: bool,
}

impl MaintenanceItem {
    pub fn is_trackable(&self) -> bool {
        self.interval_km.is_some() || self.interval_months.is_some()
    }

    pub fn service_count(&self) -> u32 {
        self.engine_oil_count.unwrap_or_default()
    }
}
