use chrono::{DateTime, Utc};
use tracing::info;

use crate::commands::transition::{commit, Outcome};
use crate::dtos::ServiceRecordRequest;
use crate::{AppError, AppState};
use motocare_domain::{AccountId, ItemId, SnapshotEnvelope, StateAction};

pub async fn record_service(
    state: &AppState,
    account_id: &AccountId,
    item_id: ItemId,
    payload: ServiceRecordRequest,
    updated_by: &str,
    now: DateTime<Utc>,
) -> Result<SnapshotEnvelope, AppError> {
    let action = StateAction::RecordService {
        item_id: item_id.clone(),
        at: now,
        notes: payload.notes,
    };
    match commit(state, account_id, action, updated_by, now).await? {
        Outcome::Applied(envelope) => {
            state.metrics.record_service_event();
            info!(
                "recorded service of {} for account {} at {} km",
                item_id, account_id, envelope.state.current_odo
            );
            Ok(envelope)
        }
        Outcome::Rejected { error, .. } => Err(error.into()),
    }
}
