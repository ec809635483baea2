use std::time::Duration;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use motocare_domain::ports::AdvisoryService;
use motocare_domain::{advice_prompt, MotorbikeState, RuntimeConfig, TieBreak};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Generative-language advisory client (`models/{model}:generateContent`).
pub struct HttpAdvisoryService {
    client: Client,
    endpoint: Option<String>,
    api_key: Option<String>,
    tie_break: TieBreak,
}

impl HttpAdvisoryService {
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.advisory_timeout_seconds.max(1)))
            .build()?;
        let endpoint = config
            .advisory_url
            .as_deref()
            .map(|base| generate_content_url(base, &config.advisory_model));
        Ok(Self {
            client,
            endpoint,
            api_key: config.advisory_api_key.clone(),
            tie_break: config.health_tie_break,
        })
    }
}

#[async_trait]
impl AdvisoryService for HttpAdvisoryService {
    async fn summarize(&self, state: &MotorbikeState, now: DateTime<Utc>) -> Result<String> {
        let (Some(endpoint), Some(api_key)) = (&self.endpoint, &self.api_key) else {
            return Err(anyhow!("advisory service not configured"));
        };
        let body = json!({
            "contents": [
                { "parts": [ { "text": advice_prompt(state, now, self.tie_break) } ] }
            ]
        });
        let response = self
            .client
            .post(endpoint)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json::<GenerateContentResponse>()
            .await?;
        Ok(response.text())
    }

    fn is_configured(&self) -> bool {
        self.endpoint.is_some() && self.api_key.is_some()
    }
}

fn generate_content_url(base: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{}:generateContent",
        base.trim().trim_end_matches('/'),
        model.trim()
    )
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate; empty when the model returned none.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default()
    }
}
