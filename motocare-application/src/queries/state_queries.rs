use chrono::{DateTime, Utc};

use crate::commands::account_commands::ensure_account;
use crate::dtos::{DashboardView, HistoryView, ItemHealthView};
use crate::{AppError, AppState};
use motocare_domain::{attention_summary, evaluate_all, AccountId, SnapshotEnvelope};

pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const MAX_HISTORY_LIMIT: usize = 500;

pub async fn get_state(
    state: &AppState,
    account_id: &AccountId,
    now: DateTime<Utc>,
) -> Result<SnapshotEnvelope, AppError> {
    ensure_account(state, account_id, now).await
}

/// Every item with its health recomputed for `now`, in catalog order.
pub async fn get_dashboard(
    state: &AppState,
    account_id: &AccountId,
    now: DateTime<Utc>,
) -> Result<DashboardView, AppError> {
    let envelope = ensure_account(state, account_id, now).await?;
    let tie_break = state.config.health_tie_break;
    let motorbike = &envelope.state;

    let items = evaluate_all(motorbike, now, tie_break)
        .into_iter()
        .map(|(item, health)| ItemHealthView {
            item: item.clone(),
            presentation_hint: health.status.presentation_hint(),
            health,
        })
        .collect::<Vec<_>>();
    let attention = attention_summary(motorbike, now, tie_break);

    Ok(DashboardView {
        model_name: motorbike.model_name.clone(),
        current_odo: motorbike.current_odo,
        revision: envelope.revision,
        requires_attention: attention.requires_attention(),
        attention,
        items,
    })
}

pub async fn get_history(
    state: &AppState,
    account_id: &AccountId,
    limit: Option<usize>,
    now: DateTime<Utc>,
) -> Result<HistoryView, AppError> {
    let limit = match limit {
        Some(0) => return Err(AppError::BadRequest("limit must be at least 1".to_string())),
        Some(value) => value.min(MAX_HISTORY_LIMIT),
        None => DEFAULT_HISTORY_LIMIT,
    };
    let envelope = ensure_account(state, account_id, now).await?;
    let history = envelope.state.history;
    Ok(HistoryView {
        total: history.len(),
        entries: history.into_iter().take(limit).collect(),
    })
}
