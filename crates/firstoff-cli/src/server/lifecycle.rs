//! Server lifecycle management.

use std::future::Future;
use std::io;
use std::time::Instant;

use crate::config::ServerConfig;
use crate::server::{Result, ServerError};
use crate::{TRACING_TARGET_SERVER_SHUTDOWN, TRACING_TARGET_SERVER_STARTUP};

/// Serves with lifecycle management and graceful shutdown.
///
/// # Errors
///
/// Returns [`ServerError::Runtime`] if the server future fails.
pub(crate) async fn serve_with_shutdown<F>(
    server_config: &ServerConfig,
    serve_fn: impl FnOnce() -> F,
) -> Result<()>
where
    F: Future<Output = io::Result<()>>,
{
    let start_time = Instant::now();

    log_security_warnings(server_config);

    tracing::info!(
        target: TRACING_TARGET_SERVER_STARTUP,
        url = %server_config.browser_url(),
        "Server is ready and listening for connections"
    );

    let result = serve_fn().await;

    handle_result(result, start_time)
}

/// Logs security warnings for potentially unsafe configurations.
fn log_security_warnings(config: &ServerConfig) {
    if config.binds_to_all_interfaces() {
        tracing::warn!(
            target: TRACING_TARGET_SERVER_STARTUP,
            "Server bound to all interfaces - ensure firewall is configured"
        );
    }
}

/// Handles the server result and logs appropriate messages.
fn handle_result(result: io::Result<()>, start_time: Instant) -> Result<()> {
    let uptime = start_time.elapsed();

    match result {
        Ok(()) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                uptime_secs = uptime.as_secs(),
                "Shutdown completed"
            );
            Ok(())
        }
        Err(err) => {
            let error = ServerError::Runtime(err);

            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %error,
                context = ?error.context(),
                uptime_secs = uptime.as_secs(),
                "Fatal error"
            );

            Err(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serve_with_shutdown_success() {
        let config = ServerConfig::default();
        let result = serve_with_shutdown(&config, || async { Ok(()) }).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn serve_with_shutdown_handles_error() {
        let config = ServerConfig::default();
        let result =
            serve_with_shutdown(&config, || async { Err(io::Error::other("test error")) }).await;

        assert!(matches!(result, Err(ServerError::Runtime(_))));
    }
}
