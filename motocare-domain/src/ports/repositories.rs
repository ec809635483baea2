use async_trait::async_trait;

use crate::entities::SnapshotEnvelope;
use crate::services::CatalogDefinition;
use crate::value_objects::AccountId;

/// Document store for account state. Saves are last-writer-wins.
#[async_trait]
pub trait StateRepository: Send + Sync {
    async fn load(&self, account_id: &AccountId) -> anyhow::Result<Option<SnapshotEnvelope>>;
    async fn save(&self, envelope: &SnapshotEnvelope) -> anyhow::Result<()>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// `Ok(None)` when no override exists at `path`.
    async fn load_catalog(&self, path: &str) -> anyhow::Result<Option<Vec<CatalogDefinition>>>;
}
