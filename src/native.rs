use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::handler::{handle_get, handle_update};
use crate::registry::{ServiceRegistry, ServiceSnapshot};

/// Initialize tracing subscriber for the binary.
/// Uses RUST_LOG env var for filtering (defaults to info). Logs go to stderr
/// so command output on stdout stays machine-readable.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_ansi(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

pub fn build_router(registry: Arc<ServiceRegistry>) -> Router {
    Router::new()
        .route("/update/:service_id", post(handle_update_axum))
        .route("/get/:service_id", get(handle_get_axum))
        .route("/health", get(|| async { "ok" }))
        .with_state(registry)
}

/// Serve `registry` on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    registry: Arc<ServiceRegistry>,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let addr: SocketAddr = listener.local_addr()?;
    info!(%addr, "discovery registry listening");

    axum::serve(listener, build_router(registry))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("discovery registry stopped");
    Ok(())
}

async fn handle_update_axum(
    State(registry): State<Arc<ServiceRegistry>>,
    Path(service_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, (StatusCode, String)> {
    handle_update(registry.as_ref(), &service_id, body)
        .map(|()| StatusCode::OK)
        .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))
}

async fn handle_get_axum(
    State(registry): State<Arc<ServiceRegistry>>,
    Path(service_id): Path<String>,
) -> Json<ServiceSnapshot> {
    Json(handle_get(registry.as_ref(), &service_id))
}
