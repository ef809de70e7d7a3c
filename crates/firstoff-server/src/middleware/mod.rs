//! Middleware for `axum::Router` and HTTP request processing.
//!
//! - Security: CORS and response security headers
//! - Observability: request IDs, tracing spans and request logs
//! - Recovery: timeouts, panics and service errors
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use axum::Router;
//! use firstoff_server::middleware::{
//!     RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt,
//! };
//!
//! let app: Router = Router::new()
//!     .with_default_recovery()
//!     .with_default_security()
//!     .with_observability();
//! ```

mod observability;
mod recovery;
pub mod security;

pub use observability::{RouterObservabilityExt, log_requests};
pub use recovery::{RecoveryConfig, RouterRecoveryExt};
pub use security::{CorsConfig, RouterSecurityExt, SecurityHeadersConfig};
