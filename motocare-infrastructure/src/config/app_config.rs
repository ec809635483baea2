use std::env;
use std::path::Path;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use motocare_domain::{
    RuntimeConfig, TieBreak, ADVICE_UNAVAILABLE_MESSAGE, DEFAULT_ADVISORY_MODEL, DEFAULT_MODEL_NAME,
};

use crate::config::validation::{validate_http_url, validate_ws_url};

pub const CONFIG_PATH_ENV: &str = "MOTOCARE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.toml";

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub api_token: Option<String>,
    pub data_dir: String,
    pub catalog_path: String,
    pub default_model_name: String,
    pub advisory_url: Option<String>,
    pub advisory_api_key: Option<String>,
    pub advisory_model: String,
    pub advisory_timeout_seconds: u64,
    pub advisory_fallback_message: String,
    pub sync_feed_url: Option<String>,
    pub sync_feed_token: Option<String>,
    pub health_tie_break: TieBreak,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            bind_addr: runtime.bind_addr,
            api_token: None,
            data_dir: runtime.data_dir,
            catalog_path: runtime.catalog_path,
            default_model_name: runtime.default_model_name,
            advisory_url: None,
            advisory_api_key: None,
            advisory_model: runtime.advisory_model,
            advisory_timeout_seconds: runtime.advisory_timeout_seconds,
            advisory_fallback_message: runtime.advisory_fallback_message,
            sync_feed_url: None,
            sync_feed_token: None,
            health_tie_break: runtime.health_tie_break,
            max_body_bytes: runtime.max_body_bytes,
            request_timeout_seconds: runtime.request_timeout_seconds,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let file_path = Path::new(&path);
        let base_dir = file_path.parent();
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str::<AppConfig>(&content)
                .map_err(|err| anyhow!("invalid config {}: {}", file_path.display(), err))?
        } else {
            warn!("{} not found, using defaults", file_path.display());
            AppConfig::default()
        };
        config.apply_env_overrides();
        config.resolve_paths(base_dir);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        for value in [
            &mut self.api_token,
            &mut self.advisory_url,
            &mut self.advisory_api_key,
            &mut self.sync_feed_url,
            &mut self.sync_feed_token,
        ] {
            if value.as_deref().map(str::trim).is_some_and(str::is_empty) {
                *value = None;
            }
        }
        if self.default_model_name.trim().is_empty() {
            self.default_model_name = DEFAULT_MODEL_NAME.to_string();
        }
        if self.advisory_model.trim().is_empty() {
            self.advisory_model = DEFAULT_ADVISORY_MODEL.to_string();
        }
        if self.advisory_fallback_message.trim().is_empty() {
            self.advisory_fallback_message = ADVICE_UNAVAILABLE_MESSAGE.to_string();
        }
    }

    fn resolve_paths(&mut self, base_dir: Option<&Path>) {
        let Some(base) = base_dir else {
            return;
        };
        self.data_dir = resolve_path(base, &self.data_dir);
        self.catalog_path = resolve_path(base, &self.catalog_path);
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.data_dir.trim().is_empty() {
            return Err(anyhow!("data_dir must not be empty"));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 || self.advisory_timeout_seconds == 0 {
            return Err(anyhow!("timeouts must be greater than 0"));
        }
        if let Some(url) = &self.advisory_url {
            validate_http_url(url).map_err(|err| anyhow!("invalid advisory_url: {}", err))?;
        }
        if let Some(url) = &self.sync_feed_url {
            validate_ws_url(url).map_err(|err| anyhow!("invalid sync_feed_url: {}", err))?;
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            api_token: self.api_token.clone(),
            data_dir: self.data_dir.clone(),
            catalog_path: self.catalog_path.clone(),
            default_model_name: self.default_model_name.clone(),
            advisory_url: self.advisory_url.clone(),
            advisory_api_key: self.advisory_api_key.clone(),
            advisory_model: self.advisory_model.clone(),
            advisory_timeout_seconds: self.advisory_timeout_seconds,
            advisory_fallback_message: self.advisory_fallback_message.clone(),
            sync_feed_url: self.sync_feed_url.clone(),
            sync_feed_token: self.sync_feed_token.clone(),
            health_tie_break: self.health_tie_break,
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var("MOTOCARE_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("MOTOCARE_API_TOKEN") {
            self.api_token = Some(value);
        }
        if let Ok(value) = env::var("MOTOCARE_DATA_DIR") {
            self.data_dir = value;
        }
        if let Ok(value) = env::var("MOTOCARE_CATALOG_PATH") {
            self.catalog_path = value;
        }
        if let Ok(value) = env::var("MOTOCARE_DEFAULT_MODEL_NAME") {
            self.default_model_name = value;
        }
        if let Ok(value) = env::var("MOTOCARE_ADVISORY_URL") {
            self.advisory_url = Some(value);
        }
        if let Ok(value) = env::var("MOTOCARE_ADVISORY_API_KEY") {
            self.advisory_api_key = Some(value);
        }
        if let Ok(value) = env::var("MOTOCARE_ADVISORY_MODEL") {
            self.advisory_model = value;
        }
        if let Ok(value) = env::var("MOTOCARE_ADVISORY_TIMEOUT_SECONDS") {
            self.advisory_timeout_seconds = value.parse().unwrap_or(self.advisory_timeout_seconds);
        }
        if let Ok(value) = env::var("MOTOCARE_ADVISORY_FALLBACK_MESSAGE") {
            self.advisory_fallback_message = value;
        }
        if let Ok(value) = env::var("MOTOCARE_SYNC_FEED_URL") {
            self.sync_feed_url = Some(value);
        }
        if let Ok(value) = env::var("MOTOCARE_SYNC_FEED_TOKEN") {
            self.sync_feed_token = Some(value);
        }
        if let Ok(value) = env::var("MOTOCARE_HEALTH_TIE_BREAK") {
            self.health_tie_break = TieBreak::from(value.as_str());
        }
        if let Ok(value) = env::var("MOTOCARE_MAX_BODY_BYTES") {
            self.max_body_bytes = value.parse().unwrap_or(self.max_body_bytes);
        }
        if let Ok(value) = env::var("MOTOCARE_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = value.parse().unwrap_or(self.request_timeout_seconds);
        }
    }
}

fn resolve_path(base: &Path, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return trimmed.to_string();
    }
    let path = Path::new(trimmed);
    if path.is_absolute() {
        trimmed.to_string()
    } else {
        base.join(path).to_string_lossy().to_string()
    }
}
