//! HTTP listener binding and serving.

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use crate::TRACING_TARGET_SERVER_STARTUP;
use crate::config::ServerConfig;
use crate::server::lifecycle::serve_with_shutdown;
use crate::server::shutdown::serve_until_deadline;
use crate::server::{Result, ServerError, shutdown_signal};

/// Binds a TCP listener to the configured address.
///
/// # Errors
///
/// Returns [`ServerError::BindError`] if the address is in use, not
/// available or requires privileges.
pub(crate) async fn bind(server_config: &ServerConfig) -> Result<TcpListener> {
    let server_addr = server_config.server_addr();

    match TcpListener::bind(server_addr).await {
        Ok(listener) => {
            tracing::info!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %server_addr,
                url = %server_config.browser_url(),
                "Successfully bound to address"
            );

            Ok(listener)
        }
        Err(listener_err) => {
            tracing::error!(
                target: TRACING_TARGET_SERVER_STARTUP,
                addr = %server_addr,
                error = %listener_err,
                "Failed to bind to address"
            );

            Err(ServerError::bind_error(
                &server_addr.to_string(),
                listener_err,
            ))
        }
    }
}

/// Serves `app` on an already bound listener with graceful shutdown.
///
/// Open connections get at most the configured shutdown timeout to finish
/// once a signal arrives.
pub(crate) async fn serve_http(
    app: Router,
    listener: TcpListener,
    server_config: &ServerConfig,
) -> Result<()> {
    let shutdown_timeout = server_config.shutdown_timeout();
    let (fired_tx, fired_rx) = oneshot::channel();

    let signal = async move {
        shutdown_signal(shutdown_timeout).await;
        let _ = fired_tx.send(());
    };

    serve_with_shutdown(server_config, || async move {
        let serve = axum::serve(listener, app.into_make_service()).with_graceful_shutdown(signal);
        serve_until_deadline(serve, fired_rx, shutdown_timeout).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr};

    use super::*;

    #[tokio::test]
    async fn bind_reports_address_in_use() -> anyhow::Result<()> {
        let occupied = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let port = occupied.local_addr()?.port();

        let config = ServerConfig {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port,
            ..ServerConfig::default()
        };

        let result = bind(&config).await;
        assert!(matches!(result, Err(ServerError::BindError { .. })));
        Ok(())
    }
}
