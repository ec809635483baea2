use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use motocare_application::{AccountLocks, AppState, Metrics, SnapshotStreamHub};
use motocare_domain::{
    builtin_catalog, seed_registry, AdvisoryService, CatalogDefinition, CatalogRepository,
    RuntimeConfig, StateRepository,
};
use motocare_infrastructure::{
    AppConfig, CatalogFileRepository, DefaultHealthService, HttpAdvisoryService, JsonStateRepository,
};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        Self::from_runtime_config(config.to_runtime_config()).await
    }

    /// Wires the file-backed repository, catalog and advisory client for an
    /// already resolved configuration.
    pub async fn from_runtime_config(runtime_config: RuntimeConfig) -> Result<Self> {
        let state_repo = Arc::new(JsonStateRepository::new(&runtime_config.data_dir));
        if let Err(err) = state_repo.ping().await {
            warn!("state directory {} not usable yet: {}", runtime_config.data_dir, err);
        }

        let catalog_repo = CatalogFileRepository::new();
        let catalog = resolve_catalog(
            &runtime_config.catalog_path,
            catalog_repo.load_catalog(&runtime_config.catalog_path).await,
        );

        let advisory = Arc::new(HttpAdvisoryService::new(&runtime_config)?);
        if !advisory.is_configured() {
            info!("advisory not configured, advice will use the fallback message");
        }
        let health = Arc::new(DefaultHealthService::new(state_repo.clone(), advisory.clone()));

        let state = AppState {
            config: runtime_config,
            state_repo,
            advisory,
            health,
            catalog: Arc::new(catalog),
            accounts: Arc::new(RwLock::new(HashMap::new())),
            account_locks: Arc::new(AccountLocks::default()),
            snapshot_hub: Arc::new(SnapshotStreamHub::default()),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}

/// Catalog override when present and valid, otherwise the built-in one.
fn resolve_catalog(
    path: &str,
    loaded: Result<Option<Vec<CatalogDefinition>>>,
) -> Vec<CatalogDefinition> {
    match loaded {
        Ok(Some(definitions)) => match seed_registry(definitions.clone(), Utc::now()) {
            Ok(registry) => {
                info!("loaded {} catalog items from {}", registry.len(), path);
                definitions
            }
            Err(err) => {
                warn!("catalog {} rejected, using built-in catalog: {}", path, err);
                builtin_catalog()
            }
        },
        Ok(None) => builtin_catalog(),
        Err(err) => {
            warn!("catalog {} unreadable, using built-in catalog: {}", path, err);
            builtin_catalog()
        }
    }
}
