// Runtime configuration handed to the application layer

use crate::value_objects::TieBreak;

#[derive(Debug, Clone)]
pub struct RuntimeConfig {
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

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3240".to_string(),
            api_token: None,
            data_dir: "./data".to_string(),
            catalog_path: "./catalog.yaml".to_string(),
            default_model_name: crate::entities::DEFAULT_MODEL_NAME.to_string(),
            advisory_url: None,
            advisory_api_key: None,
            advisory_model: crate::services::DEFAULT_ADVISORY_MODEL.to_string(),
            advisory_timeout_seconds: 20,
            advisory_fallback_message: crate::services::ADVICE_UNAVAILABLE_MESSAGE.to_string(),
            sync_feed_url: None,
            sync_feed_token: None,
            health_tie_break: TieBreak::default(),
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}
