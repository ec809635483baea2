use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::commands::transition::build_envelope;
use crate::{AppError, AppState};
use motocare_domain::{seed_registry, AccountId, MotorbikeState, SnapshotEnvelope};

const SEED_SOURCE: &str = "seed";

/// Cached state of an account, loading it from storage or seeding it from
/// the catalog on first access.
pub async fn ensure_account(
    state: &AppState,
    account_id: &AccountId,
    now: DateTime<Utc>,
) -> Result<SnapshotEnvelope, AppError> {
    if let Some(envelope) = cached(state, account_id).await {
        return Ok(envelope);
    }
    let _guard = state.account_locks.acquire(account_id).await;
    load_or_seed(state, account_id, now).await
}

/// Same as [`ensure_account`] for callers already holding the account lock.
pub(crate) async fn load_or_seed(
    state: &AppState,
    account_id: &AccountId,
    now: DateTime<Utc>,
) -> Result<SnapshotEnvelope, AppError> {
    if let Some(envelope) = cached(state, account_id).await {
        return Ok(envelope);
    }

    let loaded = state
        .state_repo
        .load(account_id)
        .await
        .map_err(|err| AppError::Internal(err.context(format!("load account {}", account_id))))?;

    let envelope = match loaded {
        Some(envelope) => envelope,
        None => {
            let envelope = seed_account(state, account_id, now)?;
            info!("seeded account {} with {} items", account_id, envelope.state.maintenance_items.len());
            if let Err(err) = state.state_repo.save(&envelope).await {
                state.metrics.record_save_error();
                warn!("failed to save seeded account {}: {}", account_id, err);
            }
            envelope
        }
    };

    state
        .accounts
        .write()
        .await
        .insert(account_id.clone(), envelope.clone());
    Ok(envelope)
}

async fn cached(state: &AppState, account_id: &AccountId) -> Option<SnapshotEnvelope> {
    let accounts = state.accounts.read().await;
    accounts.get(account_id).cloned()
}

fn seed_account(
    state: &AppState,
    account_id: &AccountId,
    now: DateTime<Utc>,
) -> Result<SnapshotEnvelope, AppError> {
    let registry = seed_registry(state.catalog.as_ref().clone(), now)?;
    let motorbike = MotorbikeState::new(state.config.default_model_name.clone(), registry);
    build_envelope(account_id.clone(), 1, motorbike, SEED_SOURCE, now)
}
