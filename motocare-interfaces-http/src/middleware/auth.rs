use axum::http::HeaderMap;

use motocare_domain::RuntimeConfig;

const CLIENT_HEADER: &str = "x-motocare-client";
const DEFAULT_CLIENT: &str = "api";
const MAX_CLIENT_LEN: usize = 64;

pub fn authorize(config: &RuntimeConfig, headers: &HeaderMap) -> bool {
    authorize_with_query(config, headers, None)
}

/// Browsers cannot set headers on websocket upgrades, so the change feed
/// also accepts the token as `?access_token=`.
pub fn authorize_with_query(
    config: &RuntimeConfig,
    headers: &HeaderMap,
    access_token: Option<&str>,
) -> bool {
    let Some(api_token) = &config.api_token else {
        return true;
    };
    extract_bearer(headers)
        .as_deref()
        .or_else(|| access_token.map(str::trim))
        .map(|token| token == api_token)
        .unwrap_or(false)
}

/// Label recorded as `updatedBy` on committed snapshots.
pub fn client_label(headers: &HeaderMap) -> String {
    headers
        .get(CLIENT_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| value.chars().take(MAX_CLIENT_LEN).collect())
        .unwrap_or_else(|| DEFAULT_CLIENT.to_string())
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
