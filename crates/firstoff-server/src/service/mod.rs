//! Application state and dependency injection.

mod config;
mod game;
mod site;

use std::path::PathBuf;

pub use crate::service::config::ServiceConfig;
pub use crate::service::game::{GameInfo, GameStats};
pub use crate::service::site::{Page, SiteFiles};

/// Tracing target for service state construction.
pub const TRACING_TARGET_SERVICE: &str = "firstoff_server::service";

/// Errors raised while building the [`ServiceState`].
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The configured site root is not a directory.
    #[error("site root {} is not a directory", .0.display())]
    SiteRootMissing(PathBuf),
}

/// Result type for service operations.
pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    site: SiteFiles,
    game: GameInfo,
    stats: GameStats,
}

impl ServiceState {
    /// Initializes application state from configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        config.validate()?;

        let service_state = Self {
            site: SiteFiles::from_config(config),
            game: GameInfo::from_config(config),
            stats: GameStats::default(),
        };

        tracing::debug!(
            target: TRACING_TARGET_SERVICE,
            site_root = %service_state.site.root().display(),
            game = %service_state.game.name,
            version = %service_state.game.version,
            "service state initialized"
        );

        Ok(service_state)
    }

    /// Returns the resolved site files.
    pub fn site(&self) -> &SiteFiles {
        &self.site
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

impl_di!(site: SiteFiles, game: GameInfo, stats: GameStats);
