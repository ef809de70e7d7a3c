//! HTTP server startup with lifecycle management.
//!
//! Checks that the site can be served, binds the listener, optionally opens
//! the game in a browser and runs until a shutdown signal arrives.

mod error;
mod http_server;
mod lifecycle;
mod shutdown;

use axum::Router;
use firstoff_server::service::ServiceConfig;

pub use crate::server::error::{Result, ServerError};
use crate::server::http_server::serve_http;
use crate::server::shutdown::shutdown_signal;
use crate::config::ServerConfig;
use crate::{TRACING_TARGET_SERVER_STARTUP, browser};

/// Verifies that every required game file exists under the site root.
///
/// # Errors
///
/// Returns [`ServerError::MissingFiles`] listing every absent file.
pub fn check_required_files(service: &ServiceConfig) -> Result<()> {
    let missing = service.missing_required_files();
    if missing.is_empty() {
        return Ok(());
    }

    for path in &missing {
        tracing::error!(
            target: TRACING_TARGET_SERVER_STARTUP,
            path = %path.display(),
            "required game file not found"
        );
    }

    Err(ServerError::MissingFiles(missing))
}

/// Starts the HTTP server and serves `app` until shutdown.
///
/// # Errors
///
/// Returns an error if:
/// - Server configuration is invalid
/// - Cannot bind to the specified address/port
/// - Server encounters a fatal error during operation
pub async fn serve(app: Router, config: ServerConfig) -> Result<()> {
    config
        .validate()
        .map_err(|err| ServerError::invalid_config(&err))?;

    let listener = http_server::bind(&config).await?;

    if config.no_open {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "browser launch disabled"
        );
    } else {
        browser::open_after_delay(config.browser_url());
    }

    serve_http(app, listener, &config).await
}
