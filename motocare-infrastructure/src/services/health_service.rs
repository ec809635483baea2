use std::sync::Arc;

use async_trait::async_trait;
use motocare_domain::ports::{AdvisoryService, HealthCheckService, StateRepository};

pub struct DefaultHealthService {
    state_repo: Arc<dyn StateRepository>,
    advisory: Arc<dyn AdvisoryService>,
}

impl DefaultHealthService {
    pub fn new(state_repo: Arc<dyn StateRepository>, advisory: Arc<dyn AdvisoryService>) -> Self {
        Self {
            state_repo,
            advisory,
        }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_storage(&self) -> anyhow::Result<bool> {
        self.state_repo.ping().await.map(|_| true)
    }

    /// Advice degrades to a fallback text, so an unconfigured advisory is
    /// reported but never fails readiness.
    async fn check_advisory(&self) -> anyhow::Result<bool> {
        Ok(self.advisory.is_configured())
    }
}
