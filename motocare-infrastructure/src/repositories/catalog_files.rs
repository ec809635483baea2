use std::path::Path;

use async_trait::async_trait;
use tokio::fs;

use motocare_domain::{CatalogDefinition, CatalogRepository};

/// YAML catalog override: a list of item definitions. A missing file means
/// "use the built-in catalog".
pub struct CatalogFileRepository;

impl CatalogFileRepository {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CatalogFileRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogRepository for CatalogFileRepository {
    async fn load_catalog(&self, path: &str) -> anyhow::Result<Option<Vec<CatalogDefinition>>> {
        if path.trim().is_empty() || !Path::new(path).exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(path).await?;
        let definitions: Vec<CatalogDefinition> = serde_yaml::from_str(&content)?;
        if definitions.is_empty() {
            anyhow::bail!("catalog {} has no items", path);
        }
        Ok(Some(definitions))
    }
}
