use std::collections::HashMap;
use std::sync::Arc;

use motocare_domain::ports::{AdvisoryService, HealthCheckService, StateRepository};
use motocare_domain::{AccountId, CatalogDefinition, RuntimeConfig, SnapshotEnvelope};
use tokio::sync::RwLock;

use crate::{AccountLocks, Metrics, SnapshotStreamHub};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub state_repo: Arc<dyn StateRepository>,
    pub advisory: Arc<dyn AdvisoryService>,
    pub health: Arc<dyn HealthCheckService>,
    /// Definitions used to seed accounts that have no stored state yet.
    pub catalog: Arc<Vec<CatalogDefinition>>,
    pub accounts: Arc<RwLock<HashMap<AccountId, SnapshotEnvelope>>>,
    /// Serializes writers per account; held across save and publish.
    pub account_locks: Arc<AccountLocks>,
    pub snapshot_hub: Arc<SnapshotStreamHub>,
    pub metrics: Arc<Metrics>,
}
