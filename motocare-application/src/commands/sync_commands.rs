use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::commands::transition::{commit, persist_and_publish, Outcome};
use crate::dtos::SnapshotPutRequest;
use crate::{AppError, AppState};
use motocare_domain::{AccountId, SnapshotEnvelope, StateAction};

const DEFAULT_SNAPSHOT_SOURCE: &str = "external";

/// Replaces an account's state with a full snapshot pushed by a client.
pub async fn replace_snapshot(
    state: &AppState,
    account_id: &AccountId,
    payload: SnapshotPutRequest,
    now: DateTime<Utc>,
) -> Result<SnapshotEnvelope, AppError> {
    let updated_by = normalize_source(payload.updated_by);
    match commit(
        state,
        account_id,
        StateAction::ReplaceSnapshot(payload.state),
        &updated_by,
        now,
    )
    .await?
    {
        Outcome::Applied(envelope) => {
            state.metrics.record_snapshot_replacement();
            info!(
                "replaced state of account {} from {} (revision {})",
                account_id, updated_by, envelope.revision
            );
            Ok(envelope)
        }
        Outcome::Rejected { error, .. } => Err(error.into()),
    }
}

/// Adopts an envelope delivered by the remote change feed. Remote snapshots
/// are authoritative; an identical checksum is skipped. An envelope that is
/// not ahead of the local revision keeps its state but is stamped with the
/// next local revision, so revisions never move backwards.
pub async fn apply_remote_snapshot(state: &AppState, envelope: SnapshotEnvelope) -> Result<bool, AppError> {
    let account_id = envelope.account_id.clone();
    let _guard = state.account_locks.acquire(&account_id).await;

    let cached = state.accounts.read().await.get(&account_id).cloned();
    let current = match cached {
        Some(current) => Some(current),
        None => state
            .state_repo
            .load(&account_id)
            .await
            .map_err(|err| AppError::Internal(err.context(format!("load account {}", account_id))))?,
    };

    let mut envelope = envelope;
    if let Some(current) = current {
        if current.checksum_sha256 == envelope.checksum_sha256 {
            debug!("remote snapshot for {} matches local state, skipping", account_id);
            return Ok(false);
        }
        if envelope.revision <= current.revision {
            debug!(
                "remote snapshot for {} at revision {} is behind local revision {}, restamping",
                account_id, envelope.revision, current.revision
            );
            envelope.revision = current.revision + 1;
        }
    }
    state
        .accounts
        .write()
        .await
        .insert(account_id.clone(), envelope.clone());

    state.metrics.record_snapshot_replacement();
    persist_and_publish(state, &envelope).await;
    info!(
        "applied remote snapshot for account {} (revision {}, by {})",
        account_id, envelope.revision, envelope.updated_by
    );
    Ok(true)
}

fn normalize_source(value: Option<String>) -> String {
    value
        .and_then(|raw| {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .unwrap_or_else(|| DEFAULT_SNAPSHOT_SOURCE.to_string())
}
