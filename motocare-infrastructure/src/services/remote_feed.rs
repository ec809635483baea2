use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::sleep;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::header::AUTHORIZATION;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

use motocare_application::commands::sync_commands::apply_remote_snapshot;
use motocare_application::AppState;
use motocare_domain::SnapshotEnvelope;

type FeedSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

const INITIAL_RECONNECT_SECONDS: u64 = 1;
const MAX_RECONNECT_SECONDS: u64 = 60;

/// Subscribes to the remote snapshot feed and applies every inbound
/// envelope as a full replacement. Reconnects with capped backoff.
pub fn spawn_remote_feed(state: AppState) {
    let Some(feed_url) = state.config.sync_feed_url.clone() else {
        info!("remote sync feed disabled: no sync_feed_url configured");
        return;
    };
    let token = state.config.sync_feed_token.clone();

    tokio::spawn(async move {
        let mut delay = INITIAL_RECONNECT_SECONDS;
        loop {
            match connect_feed(&feed_url, token.as_deref()).await {
                Ok((mut ws, mode)) => {
                    info!("remote sync feed connected: url={}, mode={}", feed_url, mode);
                    delay = INITIAL_RECONNECT_SECONDS;
                    if let Err(err) = run_feed_loop(&state, &mut ws).await {
                        warn!("remote sync feed loop exited: url={}, err={}", feed_url, err);
                    }
                }
                Err(err) => {
                    warn!("remote sync feed connect failed: url={}, err={}", feed_url, err);
                }
            }
            sleep(Duration::from_secs(delay)).await;
            delay = next_delay(delay);
        }
    });
}

async fn connect_feed(url: &str, token: Option<&str>) -> Result<(FeedSocket, &'static str)> {
    let token = token.filter(|raw| !raw.trim().is_empty());
    let mut request = url.into_client_request()?;
    if let Some(value) = token {
        request
            .headers_mut()
            .insert(AUTHORIZATION, format!("Bearer {}", value).parse()?);
    }
    match tokio_tungstenite::connect_async(request).await {
        Ok((socket, _)) => Ok((socket, "header")),
        Err(err) if token.is_none() => Err(err.into()),
        Err(_) => {
            let query_request = add_access_token_query(url, token).into_client_request()?;
            let (socket, _) = tokio_tungstenite::connect_async(query_request).await?;
            Ok((socket, "query"))
        }
    }
}

async fn run_feed_loop(state: &AppState, ws: &mut FeedSocket) -> Result<()> {
    while let Some(next) = ws.next().await {
        match next {
            Ok(Message::Text(text)) => handle_frame(state, &text).await,
            Ok(Message::Ping(bytes)) => {
                ws.send(Message::Pong(bytes)).await?;
            }
            Ok(Message::Close(frame)) => {
                return Err(anyhow::anyhow!("ws closed by peer: {:?}", frame));
            }
            Ok(_) => {}
            Err(err) => {
                return Err(anyhow::anyhow!("ws stream error: {}", err));
            }
        }
    }
    Err(anyhow::anyhow!("ws stream ended"))
}

async fn handle_frame(state: &AppState, text: &str) {
    let Some(envelope) = parse_envelope(text) else {
        debug!("ignoring remote frame that is not a snapshot envelope");
        return;
    };
    let account_id = envelope.account_id.clone();
    if let Err(err) = apply_remote_snapshot(state, envelope).await {
        warn!("remote snapshot for {} not applied: {}", account_id, err);
    }
}

fn parse_envelope(text: &str) -> Option<SnapshotEnvelope> {
    serde_json::from_str(text).ok()
}

fn next_delay(current: u64) -> u64 {
    current.saturating_mul(2).min(MAX_RECONNECT_SECONDS)
}

fn add_access_token_query(url: &str, token: Option<&str>) -> String {
    let token = match token {
        Some(value) if !value.trim().is_empty() => value,
        _ => return url.to_string(),
    };
    if url.contains("access_token=") {
        return url.to_string();
    }
    if url.contains('?') {
        format!("{}&access_token={}", url, token)
    } else {
        format!("{}?access_token={}", url, token)
    }
}
