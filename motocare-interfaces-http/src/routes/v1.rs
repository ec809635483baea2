use axum::routing::{get, post, put};
use axum::Router;

use motocare_application::AppState;

use crate::handlers::{account_handlers, feed_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/accounts/:account/state", get(account_handlers::get_state))
        .route(
            "/v1/accounts/:account/dashboard",
            get(account_handlers::get_dashboard),
        )
        .route("/v1/accounts/:account/history", get(account_handlers::get_history))
        .route(
            "/v1/accounts/:account/odometer",
            put(account_handlers::update_odometer),
        )
        .route(
            "/v1/accounts/:account/items/:item/service",
            post(account_handlers::record_service),
        )
        .route(
            "/v1/accounts/:account/snapshot",
            put(account_handlers::replace_snapshot),
        )
        .route("/v1/accounts/:account/advice", get(account_handlers::get_advice))
        .route("/v1/accounts/:account/feed", get(feed_handlers::snapshot_feed))
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
