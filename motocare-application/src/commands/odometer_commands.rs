use chrono::{DateTime, Utc};
use tracing::warn;

use crate::commands::account_commands::ensure_account;
use crate::commands::transition::{commit, Outcome};
use crate::dtos::{OdometerUpdateRequest, OdometerUpdateResponse};
use crate::{AppError, AppState};
use motocare_domain::{AccountId, StateAction};

/// Applies a new odometer reading. Regressions and unparseable input leave
/// the state unchanged and come back as `accepted: false`.
pub async fn update_odometer(
    state: &AppState,
    account_id: &AccountId,
    payload: OdometerUpdateRequest,
    updated_by: &str,
    now: DateTime<Utc>,
) -> Result<OdometerUpdateResponse, AppError> {
    let reading = match payload.odometer.to_reading() {
        Ok(reading) => reading,
        Err(err) => {
            warn!("odometer input rejected for account {}: {}", account_id, err);
            state.metrics.record_odometer_rejection();
            let snapshot = ensure_account(state, account_id, now).await?;
            return Ok(OdometerUpdateResponse {
                accepted: false,
                reason: Some(err.to_string()),
                snapshot,
            });
        }
    };

    match commit(state, account_id, StateAction::UpdateOdometer(reading), updated_by, now).await? {
        Outcome::Applied(snapshot) => {
            state.metrics.record_odometer_update();
            Ok(OdometerUpdateResponse {
                accepted: true,
                reason: None,
                snapshot,
            })
        }
        Outcome::Rejected { current, error } => {
            state.metrics.record_odometer_rejection();
            Ok(OdometerUpdateResponse {
                accepted: false,
                reason: Some(error.to_string()),
                snapshot: current,
            })
        }
    }
}
