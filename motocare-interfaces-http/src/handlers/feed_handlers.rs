use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::response::Response;
use chrono::Utc;
use serde::Deserialize;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use motocare_application::queries::state_queries;
use motocare_application::{AppError, AppState};
use motocare_domain::{AccountId, SnapshotEnvelope};

use crate::error::HttpError;
use crate::handlers::account_handlers::parse_account;
use crate::middleware::authorize_with_query;

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    pub access_token: Option<String>,
}

/// Websocket change feed: the current envelope first, then every committed
/// snapshot of the account as it happens.
pub async fn snapshot_feed(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account): Path<String>,
    Query(query): Query<FeedQuery>,
    ws: WebSocketUpgrade,
) -> Result<Response, HttpError> {
    if !authorize_with_query(&state.config, &headers, query.access_token.as_deref()) {
        return Err(HttpError::Unauthorized);
    }
    let account_id = parse_account(&account)?;
    let (updates, current) = open_feed(&state, &account_id).await?;
    Ok(ws.on_upgrade(move |socket| relay_snapshots(account_id, current, updates, socket)))
}

/// Subscribes before reading the current envelope so no commit can fall
/// between the two.
async fn open_feed(
    state: &AppState,
    account_id: &AccountId,
) -> Result<(broadcast::Receiver<SnapshotEnvelope>, SnapshotEnvelope), AppError> {
    let updates = state.snapshot_hub.subscribe(account_id).await;
    let current = state_queries::get_state(state, account_id, Utc::now()).await?;
    Ok((updates, current))
}

/// Next envelope newer than `last_sent`. Commits that landed between the
/// subscription and the initial read are already part of it.
async fn next_update(
    updates: &mut broadcast::Receiver<SnapshotEnvelope>,
    account_id: &AccountId,
    last_sent: u64,
) -> Option<SnapshotEnvelope> {
    loop {
        match updates.recv().await {
            Ok(envelope) if envelope.revision > last_sent => return Some(envelope),
            Ok(_) => {}
            Err(RecvError::Lagged(skipped)) => {
                warn!("feed for {} lagged, skipped {} snapshots", account_id, skipped);
            }
            Err(RecvError::Closed) => return None,
        }
    }
}

async fn relay_snapshots(
    account_id: AccountId,
    current: SnapshotEnvelope,
    mut updates: broadcast::Receiver<SnapshotEnvelope>,
    mut socket: WebSocket,
) {
    if send_envelope(&mut socket, &current).await.is_err() {
        return;
    }
    let mut last_sent = current.revision;
    loop {
        tokio::select! {
            update = next_update(&mut updates, &account_id, last_sent) => match update {
                Some(envelope) => {
                    if send_envelope(&mut socket, &envelope).await.is_err() {
                        break;
                    }
                    last_sent = envelope.revision;
                }
                None => break,
            },
            inbound = socket.recv() => match inbound {
                Some(Ok(Message::Close(_))) | None | Some(Err(_)) => break,
                Some(Ok(_)) => {}
            },
        }
    }
    debug!("feed for {} closed", account_id);
}

async fn send_envelope(socket: &mut WebSocket, envelope: &SnapshotEnvelope) -> Result<(), ()> {
    let payload = serde_json::to_string(envelope).map_err(|err| {
        warn!("serialize feed envelope failed: {}", err);
    })?;
    socket.send(Message::Text(payload)).await.map_err(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::state_with;
    use motocare_application::commands::odometer_commands;
    use motocare_application::dtos::{OdometerInput, OdometerUpdateRequest};
    use motocare_domain::RuntimeConfig;

    fn reading(km: u32) -> OdometerUpdateRequest {
        OdometerUpdateRequest {
            odometer: OdometerInput::Text(km.to_string()),
        }
    }

    #[tokio::test]
    async fn commit_right_after_opening_is_delivered() {
        let state = state_with(RuntimeConfig::default(), true);
        let rider = AccountId::parse("rider-feed").expect("account");
        let (mut updates, current) = open_feed(&state, &rider).await.expect("open");
        assert_eq!(current.revision, 1);

        let response = odometer_commands::update_odometer(&state, &rider, reading(800), "phone", Utc::now())
            .await
            .expect("update");
        let delivered = next_update(&mut updates, &rider, current.revision).await;
        assert_eq!(delivered, Some(response.snapshot));
    }

    #[tokio::test]
    async fn envelopes_already_sent_are_skipped() {
        let state = state_with(RuntimeConfig::default(), true);
        let rider = AccountId::parse("rider-replay").expect("account");
        let (mut updates, _) = open_feed(&state, &rider).await.expect("open");

        let first = odometer_commands::update_odometer(&state, &rider, reading(100), "web", Utc::now())
            .await
            .expect("first");
        let second = odometer_commands::update_odometer(&state, &rider, reading(200), "web", Utc::now())
            .await
            .expect("second");
        let delivered = next_update(&mut updates, &rider, first.snapshot.revision).await;
        assert_eq!(delivered, Some(second.snapshot));
    }
}
