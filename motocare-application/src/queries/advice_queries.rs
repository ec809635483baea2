use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::commands::account_commands::ensure_account;
use crate::dtos::AdviceResponse;
use crate::{AppError, AppState};
use motocare_domain::{AccountId, EMPTY_ADVICE_MESSAGE};

/// Mechanic-style advice for the account's current state. Any advisory
/// failure degrades to the configured fallback text, never to an error.
pub async fn get_advice(
    state: &AppState,
    account_id: &AccountId,
    now: DateTime<Utc>,
) -> Result<AdviceResponse, AppError> {
    let envelope = ensure_account(state, account_id, now).await?;

    if !state.advisory.is_configured() {
        state.metrics.record_advice(true);
        return Ok(fallback(state));
    }

    let timeout = Duration::from_secs(state.config.advisory_timeout_seconds.max(1));
    let reply = tokio::time::timeout(timeout, state.advisory.summarize(&envelope.state, now)).await;

    let response = match reply {
        Ok(Ok(text)) if text.trim().is_empty() => {
            info!("advisory returned no text for account {}", account_id);
            AdviceResponse {
                advice: EMPTY_ADVICE_MESSAGE.to_string(),
                fallback: true,
            }
        }
        Ok(Ok(text)) => AdviceResponse {
            advice: text.trim().to_string(),
            fallback: false,
        },
        Ok(Err(err)) => {
            warn!("advisory request failed for account {}: {:#}", account_id, err);
            fallback(state)
        }
        Err(_) => {
            warn!(
                "advisory request for account {} timed out after {}s",
                account_id,
                timeout.as_secs()
            );
            fallback(state)
        }
    };
    state.metrics.record_advice(response.fallback);
    Ok(response)
}

fn fallback(state: &AppState) -> AdviceResponse {
    AdviceResponse {
        advice: state.config.advisory_fallback_message.clone(),
        fallback: true,
    }
}
