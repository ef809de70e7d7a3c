//! Middleware configuration for the HTTP server.
//!
//! Middleware configs are defined in `firstoff-server` and support both CLI
//! arguments and environment variables.
//!
//! # Example
//!
//! ```bash
//! firstoff serve --allowed-origins "http://localhost:5173" --request-timeout 60
//! ```

use anyhow::{Result as AnyhowResult, anyhow};
use clap::Args;
use firstoff_server::middleware::{CorsConfig, RecoveryConfig};
use serde::{Deserialize, Serialize};

use super::TRACING_TARGET_CONFIG;

/// Middleware configuration combining CORS and recovery settings.
#[derive(Debug, Clone, Args, Serialize, Deserialize)]
pub struct MiddlewareConfig {
    /// CORS (Cross-Origin Resource Sharing) configuration.
    #[clap(flatten)]
    pub cors: CorsConfig,

    /// Recovery middleware configuration.
    ///
    /// Controls request timeout and panic recovery behavior.
    #[clap(flatten)]
    pub recovery: RecoveryConfig,
}

impl MiddlewareConfig {
    /// Validates that the request timeout is within 1-300 seconds.
    pub fn validate(&self) -> AnyhowResult<()> {
        let timeout = self.recovery.request_timeout;
        if timeout == 0 || timeout > 300 {
            return Err(anyhow!(
                "Request timeout {timeout} seconds is invalid. Must be between 1 and 300 seconds."
            ));
        }

        Ok(())
    }

    /// Logs middleware configuration at info level.
    pub fn log(&self) {
        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            origins = ?self.cors.allowed_origins,
            max_age_secs = self.cors.max_age_seconds,
            "CORS configuration"
        );

        tracing::info!(
            target: TRACING_TARGET_CONFIG,
            request_timeout_secs = self.recovery.request_timeout,
            "Recovery configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_invalid_request_timeouts() {
        let mut config = MiddlewareConfig {
            cors: CorsConfig::default(),
            recovery: RecoveryConfig::default(),
        };
        assert!(config.validate().is_ok());

        config.recovery = RecoveryConfig::with_timeout_secs(0);
        assert!(config.validate().is_err());

        config.recovery = RecoveryConfig::with_timeout_secs(301);
        assert!(config.validate().is_err());
    }
}
