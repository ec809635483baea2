use axum::extract::State;
use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use tokio::time::{timeout, Duration};
use tracing::error;

use motocare_application::AppState;

use crate::middleware::authorize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessReport {
    pub status: &'static str,
    pub storage: &'static str,
    pub advisory: &'static str,
}

pub async fn health_live() -> StatusCode {
    StatusCode::OK
}

/// Ready when storage answers. The advisory is reported but optional.
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let timeout_secs = state.config.request_timeout_seconds.max(1);
    let timeout_duration = Duration::from_secs(timeout_secs);
    let storage = match timeout(timeout_duration, state.health.check_storage()).await {
        Ok(Ok(true)) => "ok",
        Ok(Ok(false)) => "error",
        Ok(Err(err)) => {
            error!("ready check failed: {}", err);
            "error"
        }
        Err(_) => {
            error!("ready check timeout after {}s", timeout_secs);
            "timeout"
        }
    };
    let advisory = match state.health.check_advisory().await {
        Ok(true) => "configured",
        Ok(false) => "fallback",
        Err(err) => {
            error!("advisory check failed: {}", err);
            "error"
        }
    };
    let ready = storage == "ok";
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };
    (
        status,
        Json(ReadinessReport {
            status: if ready { "ready" } else { "unavailable" },
            storage,
            advisory,
        }),
    )
}

pub async fn metrics_prometheus(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    if !authorize(&state.config, &headers) {
        return (StatusCode::UNAUTHORIZED, "unauthorized".to_string()).into_response();
    }
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload).into_response()
}
