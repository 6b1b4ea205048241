//! Main HTTP server: routing, shared state, and lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use leafscan_core::VisionProvider;
use leafscan_media::UploadPolicy;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, instrument};

use crate::analyze;
use crate::error::ApiError;
use crate::health_api;

/// Room for multipart boundaries, headers, and small text fields.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Number of provider labels echoed back under `rawData.labels`.
pub const RAW_LABEL_LIMIT: usize = 10;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    pub vision: Arc<dyn VisionProvider>,
    pub upload_policy: UploadPolicy,
    pub raw_label_limit: usize,
}

impl GatewayState {
    pub fn new(vision: Arc<dyn VisionProvider>) -> Self {
        Self {
            vision,
            upload_policy: UploadPolicy::default(),
            raw_label_limit: RAW_LABEL_LIMIT,
        }
    }

    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.upload_policy = policy;
        self
    }
}

/// Build the router with all routes, CORS, tracing, and the body limit.
pub fn build_router(state: GatewayState) -> Router {
    let body_limit = state.upload_policy.max_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/health", get(health_api::get_health).fallback(not_found))
        .route("/analyze-leaf", post(analyze::analyze_leaf).fallback(not_found))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Unknown paths and unsupported methods on known paths share one JSON 404.
async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// Serve the gateway until Ctrl-C.
#[instrument(skip(state))]
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    info!(
        provider = state.vision.name(),
        max_upload_bytes = state.upload_policy.max_bytes,
        "Starting leaf analyzer"
    );
    let app = build_router(state);

    let listener = TcpListener::bind(&addr).await?;
    let local = listener.local_addr()?;
    info!("Leaf analyzer listening on {}", local);
    info!("Health check available at: http://{}/health", local);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Leaf analyzer stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
