// Snapshot envelope entity
// Unit of persistence and of the change feed

use serde::{Deserialize, Serialize};

use crate::entities::MotorbikeState;
use crate::value_objects::AccountId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotEnvelope {
    pub account_id: AccountId,
    pub revision: u64,
    pub updated_at_ms: i64,
    pub updated_by: String,
    pub checksum_sha256: String,
    pub state: MotorbikeState,
}
