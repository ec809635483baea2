// In-memory collaborators shared by the application tests

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use motocare_domain::ports::{AdvisoryService, HealthCheckService, StateRepository};
use motocare_domain::{builtin_catalog, AccountId, MotorbikeState, RuntimeConfig, SnapshotEnvelope};
use tokio::sync::{Mutex, RwLock};

use crate::{AccountLocks, AppState, Metrics, SnapshotStreamHub};

pub(crate) fn account(raw: &str) -> AccountId {
    AccountId::parse(raw).expect("valid test account")
}

pub(crate) fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 15, 10, 0, 0).unwrap()
}

pub(crate) fn app_state(
    repo: Arc<dyn StateRepository>,
    advisory: Arc<dyn AdvisoryService>,
) -> AppState {
    let health = Arc::new(RepoHealth {
        repo: repo.clone(),
        advisory: advisory.clone(),
    });
    AppState {
        config: RuntimeConfig::default(),
        state_repo: repo,
        advisory,
        health,
        catalog: Arc::new(builtin_catalog()),
        accounts: Arc::new(RwLock::new(HashMap::new())),
        account_locks: Arc::new(AccountLocks::default()),
        snapshot_hub: Arc::new(SnapshotStreamHub::default()),
        metrics: Arc::new(Metrics::default()),
    }
}

#[derive(Default)]
pub(crate) struct MemoryStateRepository {
    documents: Mutex<HashMap<AccountId, SnapshotEnvelope>>,
    saves: Mutex<usize>,
    fail_loads: bool,
    fail_saves: bool,
    slow_save: Option<(u64, Duration)>,
}

impl MemoryStateRepository {
    pub(crate) fn failing() -> Self {
        Self {
            fail_loads: true,
            fail_saves: true,
            ..Self::default()
        }
    }

    pub(crate) fn failing_saves() -> Self {
        Self {
            fail_saves: true,
            ..Self::default()
        }
    }

    /// Delays the save of one revision before it is written.
    pub(crate) fn slow_save_of_revision(revision: u64, delay: Duration) -> Self {
        Self {
            slow_save: Some((revision, delay)),
            ..Self::default()
        }
    }

    pub(crate) async fn stored(&self, account_id: &AccountId) -> Option<SnapshotEnvelope> {
        self.documents.lock().await.get(account_id).cloned()
    }

    pub(crate) async fn put(&self, envelope: SnapshotEnvelope) {
        self.documents
            .lock()
            .await
            .insert(envelope.account_id.clone(), envelope);
    }

    pub(crate) async fn save_count(&self) -> usize {
        *self.saves.lock().await
    }
}

#[async_trait]
impl StateRepository for MemoryStateRepository {
    async fn load(&self, account_id: &AccountId) -> anyhow::Result<Option<SnapshotEnvelope>> {
        if self.fail_loads {
            anyhow::bail!("storage offline");
        }
        Ok(self.stored(account_id).await)
    }

    async fn save(&self, envelope: &SnapshotEnvelope) -> anyhow::Result<()> {
        if self.fail_saves {
            anyhow::bail!("disk full");
        }
        if let Some((revision, delay)) = self.slow_save {
            if envelope.revision == revision {
                tokio::time::sleep(delay).await;
            }
        }
        *self.saves.lock().await += 1;
        self.put(envelope.clone()).await;
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        if self.fail_loads {
            anyhow::bail!("storage offline");
        }
        Ok(())
    }
}

pub(crate) enum StubReply {
    Text(String),
    Failure,
    Slow(Duration),
}

pub(crate) struct StubAdvisory {
    configured: bool,
    reply: StubReply,
}

impl StubAdvisory {
    pub(crate) fn unconfigured() -> Self {
        Self {
            configured: false,
            reply: StubReply::Failure,
        }
    }

    pub(crate) fn replying(text: &str) -> Self {
        Self {
            configured: true,
            reply: StubReply::Text(text.to_string()),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            configured: true,
            reply: StubReply::Failure,
        }
    }

    pub(crate) fn slow(delay: Duration) -> Self {
        Self {
            configured: true,
            reply: StubReply::Slow(delay),
        }
    }
}

#[async_trait]
impl AdvisoryService for StubAdvisory {
    async fn summarize(&self, state: &MotorbikeState, _now: DateTime<Utc>) -> anyhow::Result<String> {
        match &self.reply {
            StubReply::Text(text) => Ok(text.replace("{model}", &state.model_name)),
            StubReply::Failure => anyhow::bail!("advisory upstream returned 503"),
            StubReply::Slow(delay) => {
                tokio::time::sleep(*delay).await;
                Ok("late advice".to_string())
            }
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

struct RepoHealth {
    repo: Arc<dyn StateRepository>,
    advisory: Arc<dyn AdvisoryService>,
}

#[async_trait]
impl HealthCheckService for RepoHealth {
    async fn check_storage(&self) -> anyhow::Result<bool> {
        self.repo.ping().await.map(|_| true)
    }

    async fn check_advisory(&self) -> anyhow::Result<bool> {
        Ok(self.advisory.is_configured())
    }
}
