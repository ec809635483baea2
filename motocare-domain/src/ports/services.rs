use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::MotorbikeState;

/// Natural-language summary of maintenance priorities. Callers never
/// surface its errors; they fall back to a static message.
#[async_trait]
pub trait AdvisoryService: Send + Sync {
    async fn summarize(&self, state: &MotorbikeState, now: DateTime<Utc>) -> anyhow::Result<String>;
    fn is_configured(&self) -> bool;
}

#[async_trait]
pub trait HealthCheckService: Send + Sync {
    async fn check_storage(&self) -> anyhow::Result<bool>;
    async fn check_advisory(&self) -> anyhow::Result<bool>;
}
