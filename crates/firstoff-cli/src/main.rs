#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod browser;
mod config;
mod segment;
mod server;

use std::process;

use anyhow::Context;
use axum::Router;
use firstoff_server::handler::routes;
use firstoff_server::middleware::{
    RouterObservabilityExt, RouterRecoveryExt, RouterSecurityExt, SecurityHeadersConfig,
};
use firstoff_server::service::ServiceState;

use crate::config::{Cli, Command, MiddlewareConfig, ServeArgs};

// Tracing target constants
pub const TRACING_TARGET_SERVER_STARTUP: &str = "firstoff_cli::server::startup";
pub const TRACING_TARGET_SERVER_SHUTDOWN: &str = "firstoff_cli::server::shutdown";
pub const TRACING_TARGET_CONFIG: &str = "firstoff_cli::config";
pub const TRACING_TARGET_SEGMENT: &str = "firstoff_cli::segment";

#[tokio::main]
async fn main() {
    let Err(error) = run().await else {
        process::exit(0);
    };

    if tracing::enabled!(tracing::Level::ERROR) {
        tracing::error!(
            target: TRACING_TARGET_SERVER_SHUTDOWN,
            error = %format!("{error:#}"),
            "application terminated with error"
        );
    } else {
        eprintln!("Error: {error:#}");
    }

    process::exit(1);
}

/// Main application entry point.
async fn run() -> anyhow::Result<()> {
    let cli = Cli::init();
    Cli::init_tracing();
    cli.log();

    match cli.command {
        Command::Serve(args) => serve(args).await,
        Command::Segment(options) => segment::run(options).await,
    }
}

/// Checks the site, builds the router and serves it until shutdown.
async fn serve(args: ServeArgs) -> anyhow::Result<()> {
    args.validate()?;
    server::check_required_files(&args.service)?;

    let state = ServiceState::from_config(&args.service)
        .context("failed to create service state")?;
    let router = create_router(state, &args.middleware);

    server::serve(router, args.server).await?;
    Ok(())
}

/// Creates the router with all middleware layers applied.
///
/// Middleware is applied in reverse order (last added = outermost):
/// 1. Recovery (outermost) - catches panics and enforces timeouts
/// 2. Observability - request IDs, tracing spans and request logs
/// 3. Security - CORS and security headers
/// 4. Routes (innermost) - actual request handlers
fn create_router(state: ServiceState, middleware: &MiddlewareConfig) -> Router {
    routes(&state)
        .with_state(state)
        .with_security(&middleware.cors, &SecurityHeadersConfig::default())
        .with_observability()
        .with_recovery(&middleware.recovery)
}
