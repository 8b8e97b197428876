//! Minimal liveness endpoint for external process-health checks.

use axum::{Router, routing::get};
use tracing::info;

use crate::base::types::Void;

/// Serve a one-route liveness responder on the given port.
pub async fn serve(port: u16) -> Void {
    let app = Router::new().route("/", get(index));

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;

    info!("Health endpoint listening on port {port}.");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn index() -> &'static str {
    "ticket-bot is running"
}
