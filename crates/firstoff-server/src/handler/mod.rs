//! All `axum::`[`Router`]s with related `axum::`[`Handler`]s.
//!
//! # Usage Example
//!
//! ```rust
//! use firstoff_server::handler::routes;
//! use firstoff_server::service::{ServiceConfig, ServiceState};
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = ServiceConfig::default();
//! let state = ServiceState::from_config(&config)?;
//! let router: axum::Router = routes(&state).with_state(state);
//! # Ok(())
//! # }
//! ```
//!
//! [`Router`]: axum::routing::Router
//! [`Handler`]: axum::handler::Handler

mod error;
mod monitors;
mod pages;
mod response;
mod stats;

use axum::Router;

pub use crate::handler::error::{Error, ErrorKind, Result};
pub use crate::handler::response::{ErrorResponse, HealthStatus};
use crate::service::ServiceState;

/// Returns a [`Router`] with all routes.
///
/// Requests that match no route are answered from the site root, and with
/// the game launcher when no such file exists.
pub fn routes(state: &ServiceState) -> Router<ServiceState> {
    Router::new()
        .merge(pages::routes())
        .merge(monitors::routes())
        .merge(stats::routes())
        .fallback_service(pages::static_files(state.site()))
}

#[cfg(test)]
pub(crate) mod test {
    use std::path::Path;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use tempfile::TempDir;

    use crate::handler::routes;
    use crate::service::{ServiceConfig, ServiceState};

    /// Returns a new [`TestServer`] serving `site_root` with the default routes.
    pub fn create_test_server_in(site_root: &Path) -> anyhow::Result<TestServer> {
        let config = ServiceConfig::default().with_site_root(site_root);
        let state = ServiceState::from_config(&config)?;
        let app = routes(&state).with_state(state);
        let server = TestServer::new(app)?;
        Ok(server)
    }

    /// Returns a new [`TestServer`] over an empty temporary site root.
    ///
    /// The directory is removed once the returned [`TempDir`] is dropped.
    pub fn create_test_server() -> anyhow::Result<(TempDir, TestServer)> {
        let dir = TempDir::new()?;
        let server = create_test_server_in(dir.path())?;
        Ok((dir, server))
    }

    #[tokio::test]
    async fn merged_routes_respond() -> anyhow::Result<()> {
        let (_dir, server) = create_test_server()?;

        server.get("/health").await.assert_status_ok();
        server.get("/api/stats").await.assert_status_ok();

        // An empty site root has no launcher to fall back to.
        server
            .get("/levels/level1.json")
            .await
            .assert_status(StatusCode::NOT_FOUND);
        Ok(())
    }
}
