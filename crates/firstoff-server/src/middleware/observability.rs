//! Observability middleware: request IDs, tracing spans and request logs.

use std::time::Instant;

use axum::Router;
use axum::extract::Request;
use axum::http::HeaderName;
use axum::middleware::{Next, from_fn};
use axum::response::Response;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

/// Tracing target for per-request logs.
const TRACING_TARGET: &str = "firstoff_server::middleware::requests";

/// Header carrying the request ID.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extension trait for `axum::`[`Router`] to apply observability middleware.
pub trait RouterObservabilityExt<S> {
    /// Layers observability middleware for request tracing and logging.
    ///
    /// Generates a unique request ID, opens a tracing span for each request,
    /// logs one line per completed request and echoes the request ID back
    /// in the response.
    fn with_observability(self) -> Self;
}

impl<S> RouterObservabilityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_observability(self) -> Self {
        let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

        self.layer(from_fn(log_requests))
            .layer(PropagateRequestIdLayer::new(request_id.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
    }
}

/// Logs method, path, status and latency of every request.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::info!(
        target: TRACING_TARGET,
        method = %method,
        path = uri.path(),
        status = response.status().as_u16(),
        duration_ms = duration.as_millis() as u64,
        "request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use axum::routing::get;
    use axum_test::TestServer;

    use super::*;

    #[tokio::test]
    async fn responses_carry_request_id() -> anyhow::Result<()> {
        let app: Router = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_observability();
        let server = TestServer::new(app)?;

        let response = server.get("/").await;
        response.assert_status_ok();

        let request_id = response.header(REQUEST_ID_HEADER);
        assert!(!request_id.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn incoming_request_id_is_kept() -> anyhow::Result<()> {
        let app: Router = Router::new()
            .route("/", get(|| async { "ok" }))
            .with_observability();
        let server = TestServer::new(app)?;

        let response = server
            .get("/")
            .add_header(REQUEST_ID_HEADER, "abc-123")
            .await;
        assert_eq!(response.header(REQUEST_ID_HEADER), "abc-123");
        Ok(())
    }
}
