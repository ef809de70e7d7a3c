//! Game descriptor handler.

use axum::Router;
use axum::extract::State;
use axum::routing::get;

use crate::extract::Json;
use crate::service::{GameStats, ServiceState};

async fn game_stats(State(stats): State<GameStats>) -> Json<GameStats> {
    Json(stats)
}

/// Returns a [`Router`] serving the static game descriptor.
pub fn routes() -> Router<ServiceState> {
    Router::new().route("/api/stats", get(game_stats))
}
