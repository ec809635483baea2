use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;

use motocare_application::commands::{odometer_commands, service_commands, sync_commands};
use motocare_application::dtos::{
    AdviceResponse, DashboardView, HistoryQuery, HistoryView, OdometerUpdateRequest,
    OdometerUpdateResponse, ServiceRecordRequest, SnapshotPutRequest,
};
use motocare_application::queries::{advice_queries, state_queries};
use motocare_application::{AppError, AppState};
use motocare_domain::{AccountId, ItemId, SnapshotEnvelope};

use crate::error::HttpError;
use crate::middleware::{authorize, client_label};

pub(crate) fn parse_account(raw: &str) -> Result<AccountId, HttpError> {
    AccountId::parse(raw).map_err(|err| HttpError::from(AppError::from(err)))
}

fn guard(state: &AppState, headers: &HeaderMap, account: &str) -> Result<AccountId, HttpError> {
    if !authorize(&state.config, headers) {
        return Err(HttpError::Unauthorized);
    }
    parse_account(account)
}

pub async fn get_state(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account): Path<String>,
) -> Result<Json<SnapshotEnvelope>, HttpError> {
    let account_id = guard(&state, &headers, &account)?;
    let envelope = state_queries::get_state(&state, &account_id, Utc::now()).await?;
    Ok(Json(envelope))
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account): Path<String>,
) -> Result<Json<DashboardView>, HttpError> {
    let account_id = guard(&state, &headers, &account)?;
    let dashboard = state_queries::get_dashboard(&state, &account_id, Utc::now()).await?;
    Ok(Json(dashboard))
}

pub async fn get_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryView>, HttpError> {
    let account_id = guard(&state, &headers, &account)?;
    let history = state_queries::get_history(&state, &account_id, query.limit, Utc::now()).await?;
    Ok(Json(history))
}

pub async fn update_odometer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account): Path<String>,
    Json(payload): Json<OdometerUpdateRequest>,
) -> Result<Json<OdometerUpdateResponse>, HttpError> {
    let account_id = guard(&state, &headers, &account)?;
    let response = odometer_commands::update_odometer(
        &state,
        &account_id,
        payload,
        &client_label(&headers),
        Utc::now(),
    )
    .await?;
    Ok(Json(response))
}

pub async fn record_service(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path((account, item)): Path<(String, String)>,
    payload: Option<Json<ServiceRecordRequest>>,
) -> Result<Json<SnapshotEnvelope>, HttpError> {
    let account_id = guard(&state, &headers, &account)?;
    let payload = payload.map(|Json(body)| body).unwrap_or_default();
    let envelope = service_commands::record_service(
        &state,
        &account_id,
        ItemId::new(item),
        payload,
        &client_label(&headers),
        Utc::now(),
    )
    .await?;
    Ok(Json(envelope))
}

pub async fn replace_snapshot(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account): Path<String>,
    Json(mut payload): Json<SnapshotPutRequest>,
) -> Result<Json<SnapshotEnvelope>, HttpError> {
    let account_id = guard(&state, &headers, &account)?;
    if payload.updated_by.is_none() {
        payload.updated_by = Some(client_label(&headers));
    }
    let envelope = sync_commands::replace_snapshot(&state, &account_id, payload, Utc::now()).await?;
    Ok(Json(envelope))
}

pub async fn get_advice(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account): Path<String>,
) -> Result<Json<AdviceResponse>, HttpError> {
    let account_id = guard(&state, &headers, &account)?;
    let advice = advice_queries::get_advice(&state, &account_id, Utc::now()).await?;
    Ok(Json(advice))
}
