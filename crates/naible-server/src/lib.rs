//! HTTP surface for Naible.
//!
//! Hosts the mock personalization backend, the onboarding conversation API
//! and the rendered hero page. [`bootstrap`] is the composition root shared
//! with the CLI.

pub mod bootstrap;
pub mod error;
pub mod hero;
pub mod logging;
pub mod routes;
pub mod state;
pub mod theme_sink;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use state::{AppState, StateParts};
pub use theme_sink::StylesheetSink;

/// Builds the full router over `state`.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(routes::mock::router())
        .merge(routes::onboarding::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Serves [`app`] on `bind` until Ctrl-C.
pub async fn serve(state: Arc<AppState>, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind {bind}"))?;
    tracing::info!(addr = %listener.local_addr()?, "[Server] Listening");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("[Server] Stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "[Server] Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("[Server] Shutdown requested");
}
