//! HTTP surface of the relay — router construction and the serve loop.
//!
//! `run()` drives the axum event loop; the caller's [`CancellationToken`]
//! is wired to axum's graceful shutdown.
//!
//! ## URL layout
//!
//! ```text
//! POST /analyze-symptoms
//! GET  /health
//! ```

mod api;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::error::AppError;
use crate::llm::LlmProvider;

/// Axum router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone — the provider is clone-cheap by construction. Holds no
/// per-request or cross-request mutable state.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmProvider,
}

/// Build the relay router. Separated from [`run`] so tests can drive the
/// router directly without binding a socket.
pub fn build_router(state: AppState) -> Router {
    // The browser front-end is served from another origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/analyze-symptoms", post(api::analyze_symptoms))
        .route("/health", get(api::health))
        .layer(cors)
        .with_state(state)
}

/// Bind `bind_addr` and serve until `shutdown` is cancelled.
pub async fn run(
    bind_addr: &str,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let router = build_router(state);

    let listener = TcpListener::bind(bind_addr)
        .await
        .map_err(|e| AppError::Server(format!("bind failed on {bind_addr}: {e}")))?;

    info!(%bind_addr, "relay listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Server(format!("server error: {e}")))?;

    info!("relay shut down");
    Ok(())
}
