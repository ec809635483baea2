use std::collections::HashMap;

use motocare_domain::{AccountId, SnapshotEnvelope};
use tokio::sync::{broadcast, RwLock};

const CHANNEL_BUFFER: usize = 64;

/// Per-account change feed. Every committed state is published as a full
/// snapshot envelope; slow subscribers lag and skip, they never block writers.
#[derive(Default)]
pub struct SnapshotStreamHub {
    channels: RwLock<HashMap<AccountId, broadcast::Sender<SnapshotEnvelope>>>,
}

impl SnapshotStreamHub {
    pub async fn subscribe(&self, account_id: &AccountId) -> broadcast::Receiver<SnapshotEnvelope> {
        let mut channels = self.channels.write().await;
        channels
            .entry(account_id.clone())
            .or_insert_with(|| {
                let (tx, _rx) = broadcast::channel(CHANNEL_BUFFER);
                tx
            })
            .subscribe()
    }

    pub async fn publish(&self, envelope: &SnapshotEnvelope) {
        let channels = self.channels.read().await;
        if let Some(tx) = channels.get(&envelope.account_id) {
            let _ = tx.send(envelope.clone());
        }
    }

    pub async fn subscriber_count(&self, account_id: &AccountId) -> usize {
        let channels = self.channels.read().await;
        channels
            .get(account_id)
            .map(|tx| tx.receiver_count())
            .unwrap_or_default()
    }
}
