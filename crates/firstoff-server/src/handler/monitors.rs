//! Health check handler.

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use crate::extract::Json;
use crate::handler::response::HealthStatus;
use crate::service::{GameInfo, ServiceState};

/// Tracing target for monitor operations.
const TRACING_TARGET: &str = "firstoff_server::handler::monitors";

/// Reports that the server is up, along with the game it serves.
#[tracing::instrument(skip_all)]
async fn health_status(State(game): State<GameInfo>) -> Json<HealthStatus> {
    let status = HealthStatus::now(&game);

    tracing::debug!(
        target: TRACING_TARGET,
        timestamp = %status.timestamp,
        "health status requested"
    );

    Json(status)
}

/// Returns a [`Router`] with all health monitoring routes.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/health", get(health_status))
}
