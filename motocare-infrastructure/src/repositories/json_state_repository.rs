use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::fs;

use motocare_domain::{AccountId, SnapshotEnvelope, StateRepository};

/// One JSON document per account under `data_dir`, written through a
/// temporary file so a crash never leaves a half-written snapshot. A save
/// never replaces a document with an equal or newer revision.
pub struct JsonStateRepository {
    data_dir: PathBuf,
}

impl JsonStateRepository {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn document_path(&self, account_id: &AccountId) -> PathBuf {
        self.data_dir.join(format!("{}.json", account_id.as_str()))
    }

    /// Revision of the document on disk, if one exists and parses.
    async fn stored_revision(&self, path: &Path) -> Option<u64> {
        let content = fs::read_to_string(path).await.ok()?;
        serde_json::from_str::<StoredRevision>(&content)
            .ok()
            .map(|doc| doc.revision)
    }
}

#[derive(Deserialize)]
struct StoredRevision {
    revision: u64,
}

#[async_trait]
impl StateRepository for JsonStateRepository {
    async fn load(&self, account_id: &AccountId) -> anyhow::Result<Option<SnapshotEnvelope>> {
        let path = self.document_path(account_id);
        if !path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        let envelope: SnapshotEnvelope = serde_json::from_str(&content)
            .with_context(|| format!("parse {}", path.display()))?;
        if &envelope.account_id != account_id {
            anyhow::bail!(
                "{} holds account {} instead of {}",
                path.display(),
                envelope.account_id,
                account_id
            );
        }
        Ok(Some(envelope))
    }

    async fn save(&self, envelope: &SnapshotEnvelope) -> anyhow::Result<()> {
        ensure_dir(&self.data_dir).await?;
        let path = self.document_path(&envelope.account_id);
        if let Some(stored) = self.stored_revision(&path).await {
            if stored >= envelope.revision {
                anyhow::bail!(
                    "{} already holds revision {}, refusing revision {}",
                    path.display(),
                    stored,
                    envelope.revision
                );
            }
        }
        let tmp = path.with_extension("json.tmp");
        let content = serde_json::to_string_pretty(envelope)?;
        fs::write(&tmp, content)
            .await
            .with_context(|| format!("write {}", tmp.display()))?;
        fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("replace {}", path.display()))?;
        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        ensure_dir(&self.data_dir).await?;
        let metadata = fs::metadata(&self.data_dir).await?;
        if metadata.permissions().readonly() {
            anyhow::bail!("{} is read-only", self.data_dir.display());
        }
        Ok(())
    }
}

async fn ensure_dir(path: &Path) -> anyhow::Result<()> {
    if !path.as_os_str().is_empty() {
        fs::create_dir_all(path)
            .await
            .with_context(|| format!("create {}", path.display()))?;
    }
    Ok(())
}
