//! Response wrappers shared by the handlers.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use derive_more::{Deref, From};
use serde::Serialize;

use crate::handler::ErrorKind;

/// Pretty-printed JSON response.
///
/// Serializes with two-space indentation so the endpoints stay readable
/// when opened directly in a browser.
#[derive(Debug, Clone, Copy, Default, Deref, From)]
#[must_use]
pub struct Json<T>(pub T);

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        match serde_json::to_vec_pretty(&self.0) {
            Ok(body) => (
                StatusCode::OK,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                )],
                body,
            )
                .into_response(),
            Err(err) => ErrorKind::InternalServerError
                .with_message("Failed to serialize response")
                .with_context(err.to_string())
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn json_is_pretty_printed() -> anyhow::Result<()> {
        let response = Json(json!({ "status": "OK" })).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE),
            Some(&HeaderValue::from_static("application/json"))
        );

        let body = to_bytes(response.into_body(), usize::MAX).await?;
        assert_eq!(body.as_ref(), b"{\n  \"status\": \"OK\"\n}");
        Ok(())
    }
}
