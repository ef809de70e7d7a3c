use std::borrow::Cow;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// HTTP error response representation.
///
/// Contains everything needed to serialize an error response: the error
/// name, a message, optional context and the HTTP status code.
#[must_use = "error responses do nothing unless serialized"]
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse<'a> {
    /// The error name/type identifier
    pub name: Cow<'a, str>,
    /// User-friendly error message
    pub message: Cow<'a, str>,
    /// Underlying failure text (optional, set by handler)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<Cow<'a, str>>,
    /// HTTP status code (not serialized in JSON)
    #[serde(skip)]
    pub status: StatusCode,
}

impl<'a> ErrorResponse<'a> {
    // 4xx Client Errors
    pub const REQUEST_TIMEOUT: Self = Self::new(
        "request_timeout",
        "The request took too long to process and was terminated",
        StatusCode::REQUEST_TIMEOUT,
    );
    // 5xx Server Errors
    pub const INTERNAL_SERVER_ERROR: Self = Self::new(
        "internal_server_error",
        "An internal server error occurred",
        StatusCode::INTERNAL_SERVER_ERROR,
    );

    /// Creates a new error response.
    #[inline]
    pub const fn new(name: &'a str, message: &'a str, status: StatusCode) -> Self {
        Self {
            name: Cow::Borrowed(name),
            message: Cow::Borrowed(message),
            context: None,
            status,
        }
    }

    /// Replaces the default message.
    pub fn with_message(mut self, message: impl Into<Cow<'a, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// Attaches context to the error response.
    /// If context already exists, it merges them with a separator.
    pub fn with_context(mut self, context: impl Into<Cow<'a, str>>) -> Self {
        let new_context = context.into();
        self.context = Some(match self.context {
            Some(existing) => Cow::Owned(format!("{}; {}", existing, new_context)),
            None => new_context,
        });
        self
    }
}

impl Default for ErrorResponse<'_> {
    #[inline]
    fn default() -> Self {
        Self::INTERNAL_SERVER_ERROR
    }
}

impl IntoResponse for ErrorResponse<'_> {
    #[inline]
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_response_replaces_message() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR.with_message("Server error");
        assert_eq!(&response.message, "Server error");
    }

    #[test]
    fn error_response_merging_context() {
        let response = ErrorResponse::INTERNAL_SERVER_ERROR
            .with_context("Permission denied")
            .with_context("while resolving index.html");

        assert_eq!(
            response.context.as_deref(),
            Some("Permission denied; while resolving index.html")
        );
    }

    #[test]
    fn error_response_serialization() -> anyhow::Result<()> {
        let response = ErrorResponse::REQUEST_TIMEOUT.with_context("handler exceeded 30s");
        let json = serde_json::to_value(&response)?;

        assert_eq!(json["name"], "request_timeout");
        assert_eq!(json["context"], "handler exceeded 30s");
        assert!(json.get("status").is_none());
        Ok(())
    }
}
