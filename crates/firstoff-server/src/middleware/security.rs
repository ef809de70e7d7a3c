//! Security middleware: CORS and response security headers.
//!
//! The game is served to a browser on the same machine, so the defaults are
//! permissive on origins and strict on framing and content sniffing.

use std::time::Duration;

use axum::Router;
use axum::http::Method;
use axum::http::header::{self, HeaderValue};
#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

/// Extension trait for `axum::`[`Router`] to apply security middleware.
pub trait RouterSecurityExt<S> {
    /// Layers CORS and security headers with the provided configurations.
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self;

    /// Layers security middlewares with default configurations.
    ///
    /// Allows any origin and sets `nosniff`, `DENY` framing and the legacy
    /// XSS filter header on every response.
    fn with_default_security(self) -> Self;
}

impl<S> RouterSecurityExt<S> for Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn with_security(self, cors: &CorsConfig, headers: &SecurityHeadersConfig) -> Self {
        let cors_layer = CorsLayer::new()
            .allow_origin(cors.allow_origin())
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([header::CONTENT_TYPE])
            .max_age(cors.max_age());

        // CorsLayer only lists methods and headers on preflight responses.
        let mut router = self
            .layer(cors_layer)
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static("GET, POST, OPTIONS"),
            ))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::ACCESS_CONTROL_ALLOW_HEADERS,
                HeaderValue::from_static("Content-Type"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static(headers.frame_options.as_str()),
            ));

        if headers.xss_protection {
            router = router.layer(SetResponseHeaderLayer::overriding(
                header::X_XSS_PROTECTION,
                HeaderValue::from_static("1; mode=block"),
            ));
        }

        router
    }

    fn with_default_security(self) -> Self {
        self.with_security(&CorsConfig::default(), &SecurityHeadersConfig::default())
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct CorsConfig {
    /// List of allowed CORS origins.
    ///
    /// If empty or containing `*`, any origin is allowed.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_ORIGINS", value_delimiter = ',')
    )]
    pub allowed_origins: Vec<String>,

    /// Maximum age for CORS preflight requests in seconds.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "CORS_MAX_AGE", default_value = "3600")
    )]
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_age_seconds: 3600,
        }
    }
}

impl CorsConfig {
    /// Returns the CORS max age as a Duration.
    pub fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_seconds)
    }

    /// Converts configured origins to an [`AllowOrigin`] policy.
    ///
    /// A `*` entry allows any origin. Origins that are not valid header
    /// values are skipped.
    pub fn allow_origin(&self) -> AllowOrigin {
        let wildcard = self
            .allowed_origins
            .iter()
            .any(|origin| origin.trim() == "*");

        if self.allowed_origins.is_empty() || wildcard {
            return AllowOrigin::any();
        }

        let origins: Vec<HeaderValue> = self
            .allowed_origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();

        AllowOrigin::list(origins)
    }
}

/// Security headers configuration for the application.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use = "config does nothing unless you use it"]
pub struct SecurityHeadersConfig {
    /// X-Frame-Options value protecting against clickjacking.
    pub frame_options: FrameOptions,

    /// Whether to send `X-XSS-Protection: 1; mode=block`.
    pub xss_protection: bool,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            frame_options: FrameOptions::Deny,
            xss_protection: true,
        }
    }
}

/// X-Frame-Options header values controlling frame embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameOptions {
    /// The page cannot be displayed in a frame, regardless of the site.
    Deny,
    /// The page can only be displayed in a frame on the same origin.
    SameOrigin,
}

impl FrameOptions {
    /// Returns the header value string.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Deny => "DENY",
            Self::SameOrigin => "SAMEORIGIN",
        }
    }
}
