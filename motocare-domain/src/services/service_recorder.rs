use chrono::{DateTime, Utc};

use crate::entities::{MotorbikeState, ServiceLog};
use crate::error::DomainError;
use crate::value_objects::ItemId;

/// Records a completed service of `item_id` at the current odometer.
pub fn record_service(
    state: &MotorbikeState,
    item_id: &ItemId,
    now: DateTime<Utc>,
) -> Result<MotorbikeState, DomainError> {
    record_service_with_notes(state, item_id, now, None)
}

pub fn record_service_with_notes(
    state: &MotorbikeState,
    item_id: &ItemId,
    now: DateTime<Utc>,
    notes: Option<String>,
) -> Result<MotorbikeState, DomainError> {
    let item = state
        .item(item_id)
        .ok_or_else(|| DomainError::NotFound(item_id.clone()))?;

    let log = ServiceLog::new(item, state.current_odo, now, normalize_notes(notes));

    let mut serviced = item.clone();
    serviced.last_service_odo = state.current_odo;
    serviced.last_service_date = now;
    if serviced.tracks_service_count {
        serviced.engine_oil_count = Some(serviced.service_count().saturating_add(1));
    }
    let maintenance_items = state.maintenance_items.with_item(serviced)?;

    let mut history = Vec::with_capacity(state.history.len() + 1);
    history.push(log);
    history.extend(state.history.iter().cloned());

    Ok(MotorbikeState {
        model_name: state.model_name.clone(),
        current_odo: state.current_odo,
        maintenance_items,
        history,
    })
}

/// Accepts a new odometer reading. Readings below the current one are
/// rejected and the caller keeps its state.
pub fn update_odometer(state: &MotorbikeState, new_odo: u32) -> Result<MotorbikeState, DomainError> {
    if new_odo < state.current_odo {
        return Err(DomainError::InvalidInput(format!(
            "odometer {} km is below current reading {} km",
            new_odo, state.current_odo
        )));
    }
    Ok(MotorbikeState {
        current_odo: new_odo,
        ..state.clone()
    })
}

/// Parses raw user input into a whole-kilometre odometer reading.
pub fn parse_odometer(raw: &str) -> Result<u32, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidInput("odometer is empty".to_string()));
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| DomainError::InvalidInput(format!("odometer '{}' is not a whole number", trimmed)))
}

fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}
