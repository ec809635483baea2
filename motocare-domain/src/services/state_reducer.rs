use chrono::{DateTime, Utc};

use crate::entities::MotorbikeState;
use crate::error::DomainError;
use crate::services::service_recorder::{record_service_with_notes, update_odometer};
use crate::value_objects::ItemId;

/// Everything that can move a `MotorbikeState` forward: a local command or
/// a snapshot delivered by the sync collaborator.
#[derive(Debug, Clone, PartialEq)]
pub enum StateAction {
    UpdateOdometer(u32),
    RecordService {
        item_id: ItemId,
        at: DateTime<Utc>,
        notes: Option<String>,
    },
    ReplaceSnapshot(MotorbikeState),
}

impl StateAction {
    pub fn name(&self) -> &'static str {
        match self {
            StateAction::UpdateOdometer(_) => "update_odometer",
            StateAction::RecordService { .. } => "record_service",
            StateAction::ReplaceSnapshot(_) => "replace_snapshot",
        }
    }
}

/// Inbound snapshots replace local state wholesale; nothing is merged.
pub fn reduce(state: &MotorbikeState, action: StateAction) -> Result<MotorbikeState, DomainError> {
    match action {
        StateAction::UpdateOdometer(new_odo) => update_odometer(state, new_odo),
        StateAction::RecordService { item_id, at, notes } => {
            record_service_with_notes(state, &item_id, at, notes)
        }
        StateAction::ReplaceSnapshot(snapshot) => Ok(snapshot),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::services::{builtin_catalog, seed_registry, ENGINE_OIL_ID};

    fn seeded() -> MotorbikeState {
        let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        MotorbikeState::new("Aerox", seed_registry(builtin_catalog(), at).expect("catalog"))
    }

    #[test]
    fn snapshot_replaces_local_state_entirely() {
        let local = reduce(&seeded(), StateAction::UpdateOdometer(8_000)).expect("odometer");
        let mut remote = seeded();
        remote.model_name = "NMAX".to_string();
        remote.current_odo = 4_000;

        let next = reduce(&local, StateAction::ReplaceSnapshot(remote.clone())).expect("replace");
        assert_eq!(next, remote);
    }

    #[test]
    fn local_commands_route_to_the_recorder() {
        let at = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();
        let state = reduce(&seeded(), StateAction::UpdateOdometer(3_100)).expect("odometer");
        let state = reduce(
            &state,
            StateAction::RecordService {
                item_id: ItemId::from(ENGINE_OIL_ID),
                at,
                notes: None,
            },
        )
        .expect("service");
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].odo_at_service, 3_100);

        let rejected = reduce(&state, StateAction::UpdateOdometer(3_000));
        assert!(matches!(rejected, Err(DomainError::InvalidInput(_))));
    }
}
