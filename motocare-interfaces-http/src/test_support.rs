// In-memory collaborators shared by the HTTP tests

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use motocare_application::{AccountLocks, AppState, Metrics, SnapshotStreamHub};
use motocare_domain::ports::{AdvisoryService, HealthCheckService, StateRepository};
use motocare_domain::{builtin_catalog, AccountId, MotorbikeState, RuntimeConfig, SnapshotEnvelope};

#[derive(Default)]
struct MemoryRepo {
    documents: Mutex<HashMap<AccountId, SnapshotEnvelope>>,
}

#[async_trait]
impl StateRepository for MemoryRepo {
    async fn load(&self, account_id: &AccountId) -> anyhow::Result<Option<SnapshotEnvelope>> {
        Ok(self.documents.lock().await.get(account_id).cloned())
    }

    async fn save(&self, envelope: &SnapshotEnvelope) -> anyhow::Result<()> {
        self.documents
            .lock()
            .await
            .insert(envelope.account_id.clone(), envelope.clone());
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

struct NoAdvisory;

#[async_trait]
impl AdvisoryService for NoAdvisory {
    async fn summarize(&self, _state: &MotorbikeState, _now: DateTime<Utc>) -> anyhow::Result<String> {
        anyhow::bail!("not configured")
    }

    fn is_configured(&self) -> bool {
        false
    }
}

struct StaticHealth {
    storage: bool,
}

#[async_trait]
impl HealthCheckService for StaticHealth {
    async fn check_storage(&self) -> anyhow::Result<bool> {
        if self.storage {
            Ok(true)
        } else {
            anyhow::bail!("data dir missing")
        }
    }

    async fn check_advisory(&self) -> anyhow::Result<bool> {
        Ok(false)
    }
}

pub(crate) fn state_with(config: RuntimeConfig, storage_ok: bool) -> AppState {
    AppState {
        config,
        state_repo: Arc::new(MemoryRepo::default()),
        advisory: Arc::new(NoAdvisory),
        health: Arc::new(StaticHealth { storage: storage_ok }),
        catalog: Arc::new(builtin_catalog()),
        accounts: Arc::new(RwLock::new(HashMap::new())),
        account_locks: Arc::new(AccountLocks::default()),
        snapshot_hub: Arc::new(SnapshotStreamHub::default()),
        metrics: Arc::new(Metrics::default()),
    }
}
