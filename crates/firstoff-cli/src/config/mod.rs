//! CLI configuration management.
//!
//! ```text
//! Cli
//! ├── serve: ServeArgs
//! │   ├── server: ServerConfig         # Host, port, shutdown, browser
//! │   ├── middleware: MiddlewareConfig # CORS, recovery/timeouts
//! │   └── service: ServiceConfig       # Site root, pages, game info
//! └── segment: SegmentOptions          # Input, output, segment geometry
//! ```
//!
//! All configuration can be provided via CLI arguments or environment variables.
//! Use `--help` to see all available options.
//!
//! # Example
//!
//! ```bash
//! firstoff serve --port 9000 --no-open
//!
//! # Or via environment variables
//! PORT=9000 SITE_ROOT=../first-off firstoff serve
//! ```

mod middleware;
mod server;

use std::process;

use anyhow::Context;
use clap::{Parser, Subcommand};
use firstoff_segmenter::SegmentOptions;
use firstoff_server::service::ServiceConfig;
pub use middleware::MiddlewareConfig;
use serde::{Deserialize, Serialize};
pub use server::ServerConfig;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::{TRACING_TARGET_CONFIG, TRACING_TARGET_SERVER_STARTUP};

/// Complete CLI configuration.
#[derive(Debug, Clone, Parser, Serialize, Deserialize)]
#[command(name = "firstoff")]
#[command(about = "First Off development server and background segmenter")]
#[command(version)]
pub struct Cli {
    /// Command to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Clone, Subcommand, Serialize, Deserialize)]
pub enum Command {
    /// Serve the game and its assets over HTTP.
    Serve(ServeArgs),

    /// Slice a background image into fixed-width segments.
    Segment(SegmentOptions),
}

/// Arguments of the `serve` command.
#[derive(Debug, Clone, clap::Args, Serialize, Deserialize)]
pub struct ServeArgs {
    /// Server network and lifecycle configuration.
    #[clap(flatten)]
    pub server: ServerConfig,

    /// HTTP middleware configuration (CORS, timeouts).
    #[clap(flatten)]
    pub middleware: MiddlewareConfig,

    /// Site root, page files and game information.
    #[clap(flatten)]
    pub service: ServiceConfig,
}

impl ServeArgs {
    /// Validates middleware and site configuration.
    ///
    /// Server settings are validated when the server starts.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.middleware
            .validate()
            .context("invalid middleware configuration")?;
        self.service
            .validate()
            .context("invalid service configuration")?;
        Ok(())
    }
}

impl Cli {
    /// Loads environment variables from .env file (if enabled) and parses CLI arguments.
    pub fn init() -> Self {
        Self::load_dotenv();
        Self::parse()
    }

    /// Loads environment variables from .env file if the dotenv feature is enabled.
    ///
    /// Called before parsing so that clap's `env` fallbacks see the values.
    #[cfg(feature = "dotenv")]
    fn load_dotenv() {
        if let Err(err) = dotenvy::dotenv()
            && !err.not_found()
        {
            eprintln!("Warning: failed to load .env file: {err}");
        }
    }

    /// No-op when dotenv feature is disabled.
    #[cfg(not(feature = "dotenv"))]
    fn load_dotenv() {}

    /// Initializes tracing with environment-based filtering.
    pub fn init_tracing() {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    /// Logs build information at debug level.
    fn log_build_info() {
        tracing::debug!(
            target: TRACING_TARGET_SERVER_STARTUP,
            version = env!("CARGO_PKG_VERSION"),
            pid = process::id(),
            arch = std::env::consts::ARCH,
            os = std::env::consts::OS,
            features = ?Self::enabled_features(),
            "Build information"
        );
    }

    /// Logs configuration of the selected command.
    pub fn log(&self) {
        Self::log_build_info();

        match &self.command {
            Command::Serve(args) => {
                args.server.log();
                args.middleware.log();

                tracing::info!(
                    target: TRACING_TARGET_CONFIG,
                    site_root = %args.service.site_root.display(),
                    required_files = ?args.service.required_files,
                    game = %args.service.game_name,
                    "Site configuration"
                );
            }
            Command::Segment(options) => {
                tracing::info!(
                    target: TRACING_TARGET_CONFIG,
                    input = %options.input.display(),
                    output = %options.output.display(),
                    segment_width = options.segment_width,
                    game_height = options.game_height,
                    "Segment configuration"
                );
            }
        }
    }

    /// Returns a list of enabled compile-time features.
    fn enabled_features() -> Vec<&'static str> {
        [cfg!(feature = "dotenv").then_some("dotenv")]
            .into_iter()
            .flatten()
            .collect()
    }
}
