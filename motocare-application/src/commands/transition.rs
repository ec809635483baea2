use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::commands::account_commands::load_or_seed;
use crate::{AppError, AppState};
use motocare_domain::{reduce, AccountId, DomainError, MotorbikeState, SnapshotEnvelope, StateAction};

pub(crate) enum Outcome {
    Applied(SnapshotEnvelope),
    Rejected {
        current: SnapshotEnvelope,
        error: DomainError,
    },
}

/// Runs one action through the reducer against the cached account state,
/// then persists and publishes the result. The account lock is held until
/// the publish completes.
pub(crate) async fn commit(
    state: &AppState,
    account_id: &AccountId,
    action: StateAction,
    updated_by: &str,
    now: DateTime<Utc>,
) -> Result<Outcome, AppError> {
    let _guard = state.account_locks.acquire(account_id).await;
    let current = load_or_seed(state, account_id, now).await?;
    let action_name = action.name();

    let envelope = match reduce(&current.state, action) {
        Ok(next) => next_envelope(&current, next, updated_by, now)?,
        Err(error) => {
            warn!("{} rejected for account {}: {}", action_name, account_id, error);
            return Ok(Outcome::Rejected { current, error });
        }
    };
    state
        .accounts
        .write()
        .await
        .insert(account_id.clone(), envelope.clone());

    persist_and_publish(state, &envelope).await;
    Ok(Outcome::Applied(envelope))
}

/// Saves and fans out a committed envelope. Callers hold the account lock.
/// A failed save keeps the local transition; the next successful save
/// carries it.
pub(crate) async fn persist_and_publish(state: &AppState, envelope: &SnapshotEnvelope) {
    if let Err(err) = state.state_repo.save(envelope).await {
        state.metrics.record_save_error();
        warn!(
            "failed to save account {} revision {}: {}",
            envelope.account_id, envelope.revision, err
        );
    }
    state.snapshot_hub.publish(envelope).await;
}

pub(crate) fn next_envelope(
    current: &SnapshotEnvelope,
    next: MotorbikeState,
    updated_by: &str,
    now: DateTime<Utc>,
) -> Result<SnapshotEnvelope, AppError> {
    build_envelope(
        current.account_id.clone(),
        current.revision + 1,
        next,
        updated_by,
        now,
    )
}

pub(crate) fn build_envelope(
    account_id: AccountId,
    revision: u64,
    state: MotorbikeState,
    updated_by: &str,
    now: DateTime<Utc>,
) -> Result<SnapshotEnvelope, AppError> {
    Ok(SnapshotEnvelope {
        account_id,
        revision,
        updated_at_ms: now.timestamp_millis(),
        updated_by: updated_by.to_string(),
        checksum_sha256: checksum_sha256(&state)?,
        state,
    })
}

pub(crate) fn checksum_sha256(state: &MotorbikeState) -> Result<String, AppError> {
    let bytes = serde_json::to_vec(state)
        .map_err(|err| AppError::Internal(anyhow::anyhow!("serialize state checksum failed: {err}")))?;
    let digest = Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{:02x}", byte));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::test_support::{account, app_state, fixed_now, MemoryStateRepository, StubAdvisory};
    use motocare_domain::MaintenanceRegistry;

    #[tokio::test(start_paused = true)]
    async fn concurrent_commits_reach_storage_and_feed_in_revision_order() {
        let repo = Arc::new(MemoryStateRepository::slow_save_of_revision(2, Duration::from_millis(100)));
        let state = app_state(repo.clone(), Arc::new(StubAdvisory::unconfigured()));
        let rider = account("rider-race");
        let mut feed = state.snapshot_hub.subscribe(&rider).await;

        let first = commit(&state, &rider, StateAction::UpdateOdometer(1_000), "phone", fixed_now());
        let second = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            commit(&state, &rider, StateAction::UpdateOdometer(2_000), "web", fixed_now()).await
        };
        let (first, second) = tokio::join!(first, second);
        assert!(matches!(first.expect("first"), Outcome::Applied(ref e) if e.revision == 2));
        assert!(matches!(second.expect("second"), Outcome::Applied(ref e) if e.revision == 3));

        let cached = state.accounts.read().await.get(&rider).cloned().expect("cached");
        let stored = repo.stored(&rider).await.expect("stored");
        assert_eq!(stored, cached);
        assert_eq!(stored.revision, 3);
        assert_eq!(stored.state.current_odo, 2_000);

        let order = [
            feed.recv().await.expect("revision 2").revision,
            feed.recv().await.expect("revision 3").revision,
        ];
        assert_eq!(order, [2, 3]);
    }

    #[test]
    fn checksum_is_lowercase_hex_sha256() {
        let checksum = checksum_sha256(&MotorbikeState::new("Test Bike", MaintenanceRegistry::default())).expect("checksum");
        assert_eq!(checksum.len(), 64);
        assert!(checksum.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }
}
