use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use motocare_application::AppState;
use motocare_domain::RuntimeConfig;
use motocare_infrastructure::spawn_remote_feed;
use motocare_interfaces_http::build_router;

use crate::context::AppContext;

/// The v1 API behind the body limit and request timeout from config.
pub fn motocare_app(state: AppState) -> Router {
    let body_limit = usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX);
    let request_timeout = Duration::from_secs(state.config.request_timeout_seconds);
    build_router(state)
        .layer(CorsLayer::permissive())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

pub async fn run_standalone() -> Result<()> {
    let state = AppContext::new().await?.state;

    spawn_remote_feed(state.clone());
    let listener = bind(&state.config).await?;
    axum::serve(listener, motocare_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("motocare stopped");
    Ok(())
}

async fn bind(config: &RuntimeConfig) -> Result<TcpListener> {
    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {}", config.bind_addr))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {}", addr))?;
    info!(
        "motocare listening on {} (data dir {}, auth {})",
        addr,
        config.data_dir,
        if config.api_token.is_some() { "on" } else { "off" }
    );
    Ok(listener)
}

/// Resolves on ctrl-c or, on unix, SIGTERM.
async fn shutdown_signal() {
    let interrupt = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("ctrl-c handler unavailable: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("sigterm handler unavailable: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("interrupt received, draining connections"),
        _ = terminate => info!("terminate received, draining connections"),
    }
}
