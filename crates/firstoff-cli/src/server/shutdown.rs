//! Graceful shutdown signal handling.

use std::future::{IntoFuture, pending};
use std::io;
use std::time::Duration;

use tokio::signal::ctrl_c;
#[cfg(unix)]
use tokio::signal::unix;
use tokio::sync::oneshot;

use crate::TRACING_TARGET_SERVER_SHUTDOWN;

/// Waits for a shutdown signal (SIGTERM or SIGINT/Ctrl+C).
pub async fn shutdown_signal(shutdown_timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            tracing::error!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                error = %e,
                "Failed to install Ctrl+C handler"
            );
        } else {
            tracing::info!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                "Received Ctrl+C signal, initiating graceful shutdown"
            );
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match unix::signal(unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
                tracing::info!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    "Received SIGTERM signal, initiating graceful shutdown"
                );
            }
            Err(e) => {
                tracing::error!(
                    target: TRACING_TARGET_SERVER_SHUTDOWN,
                    error = %e,
                    "Failed to install SIGTERM handler"
                );
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!(
        target: TRACING_TARGET_SERVER_SHUTDOWN,
        timeout_secs = shutdown_timeout.as_secs(),
        "Graceful shutdown initiated"
    );
}

/// Drives `serve` to completion, giving up once `shutdown_timeout` has passed
/// after `signal_fired` resolves.
///
/// Connections still open at the deadline are dropped with the server. If the
/// sender of `signal_fired` is dropped without sending, no deadline applies.
pub(crate) async fn serve_until_deadline<S>(
    serve: S,
    signal_fired: oneshot::Receiver<()>,
    shutdown_timeout: Duration,
) -> io::Result<()>
where
    S: IntoFuture<Output = io::Result<()>>,
{
    let deadline = async move {
        match signal_fired.await {
            Ok(()) => tokio::time::sleep(shutdown_timeout).await,
            Err(_) => pending::<()>().await,
        }
    };

    tokio::select! {
        result = serve.into_future() => result,
        () = deadline => {
            tracing::warn!(
                target: TRACING_TARGET_SERVER_SHUTDOWN,
                timeout_secs = shutdown_timeout.as_secs(),
                "Graceful shutdown timed out, closing remaining connections"
            );
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn deadline_ends_a_stalled_shutdown() -> anyhow::Result<()> {
        let (fired_tx, fired_rx) = oneshot::channel();
        let _ = fired_tx.send(());

        let serve = pending::<io::Result<()>>();
        let result = tokio::time::timeout(
            Duration::from_secs(5),
            serve_until_deadline(serve, fired_rx, Duration::from_millis(10)),
        )
        .await?;

        assert!(result.is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn serve_result_wins_without_a_signal() {
        let (fired_tx, fired_rx) = oneshot::channel::<()>();
        drop(fired_tx);

        let serve = async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            Err(io::Error::other("listener closed"))
        };
        let result = serve_until_deadline(serve, fired_rx, Duration::from_millis(1)).await;

        assert!(result.is_err());
    }
}
