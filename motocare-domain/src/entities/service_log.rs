// Service log entity
// Immutable record of one completed service

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::MaintenanceItem;
use crate::value_objects::ItemId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceLog {
    pub id: String,
    pub item_id: ItemId,
    pub item_name: String,
    pub odo_at_service: u32,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ServiceLog {
    pub fn new(
        item: &MaintenanceItem,
        odo_at_service: u32,
        date: DateTime<Utc>,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            odo_at_service,
            date,
            notes,
        }
    }
}
