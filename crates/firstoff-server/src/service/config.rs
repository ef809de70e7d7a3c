use std::path::PathBuf;

#[cfg(feature = "config")]
use clap::Args;
use serde::{Deserialize, Serialize};

use crate::service::{Page, Result, ServiceError};

/// Default values for configuration options.
mod defaults {
    /// Default directory static files are served from.
    pub const SITE_ROOT: &str = ".";

    /// Default file for the home page route.
    pub const HOME_PAGE: &str = "localhost-game.html";

    /// Default file for the game launcher route, also the fallback page.
    pub const LAUNCHER_PAGE: &str = "game-launcher.html";

    /// Default file for the original version route.
    pub const ORIGINAL_PAGE: &str = "index.html";

    /// Default files that must exist before the server starts.
    pub const REQUIRED_FILES: &str = "first-off-game.js,game-launcher.html";

    /// Default game name reported by the health endpoint.
    pub const GAME_NAME: &str = "First Off - Brooklyn Street Mini Game";

    /// Default game version reported by the health endpoint.
    pub const GAME_VERSION: &str = "1.0.0";

    pub fn required_files() -> Vec<String> {
        REQUIRED_FILES.split(',').map(str::to_owned).collect()
    }
}

/// App [`state`] configuration.
///
/// # Environment Variables
///
/// With the `config` feature every option can also be set via:
/// - `SITE_ROOT` - Directory static files are served from (default: `.`)
/// - `HOME_PAGE`, `LAUNCHER_PAGE`, `ORIGINAL_PAGE` - Files behind the named routes
/// - `REQUIRED_FILES` - Comma-separated files that must exist at startup
/// - `GAME_NAME`, `GAME_VERSION` - Values reported by `/health`
///
/// [`state`]: crate::service::ServiceState
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
#[must_use = "config does nothing unless you use it"]
pub struct ServiceConfig {
    /// Directory static files are served from.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "SITE_ROOT", default_value = defaults::SITE_ROOT)
    )]
    pub site_root: PathBuf,

    /// File served for `/`, relative to the site root.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "HOME_PAGE", default_value = defaults::HOME_PAGE)
    )]
    pub home_page: String,

    /// File served for `/game` and whenever another file is missing.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "LAUNCHER_PAGE", default_value = defaults::LAUNCHER_PAGE)
    )]
    pub launcher_page: String,

    /// File served for `/original`, relative to the site root.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "ORIGINAL_PAGE", default_value = defaults::ORIGINAL_PAGE)
    )]
    pub original_page: String,

    /// Files that must exist under the site root before the server starts.
    #[cfg_attr(
        feature = "config",
        arg(
            long,
            env = "REQUIRED_FILES",
            value_delimiter = ',',
            default_value = defaults::REQUIRED_FILES
        )
    )]
    pub required_files: Vec<String>,

    /// Game name reported by the health endpoint.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "GAME_NAME", default_value = defaults::GAME_NAME)
    )]
    pub game_name: String,

    /// Game version reported by the health endpoint.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "GAME_VERSION", default_value = defaults::GAME_VERSION)
    )]
    pub game_version: String,
}

impl ServiceConfig {
    /// Sets the site root.
    pub fn with_site_root(mut self, site_root: impl Into<PathBuf>) -> Self {
        self.site_root = site_root.into();
        self
    }

    /// Returns the file name configured for `page`.
    #[must_use]
    pub fn page_file(&self, page: Page) -> &str {
        match page {
            Page::Home => &self.home_page,
            Page::Launcher => &self.launcher_page,
            Page::Original => &self.original_page,
        }
    }

    /// Validates that the site root is an existing directory.
    pub fn validate(&self) -> Result<()> {
        if !self.site_root.is_dir() {
            return Err(ServiceError::SiteRootMissing(self.site_root.clone()));
        }

        Ok(())
    }

    /// Returns the required files that do not exist under the site root.
    #[must_use]
    pub fn missing_required_files(&self) -> Vec<PathBuf> {
        self.required_files
            .iter()
            .filter(|file| !file.is_empty())
            .map(|file| self.site_root.join(file))
            .filter(|path| !path.is_file())
            .collect()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            site_root: PathBuf::from(defaults::SITE_ROOT),
            home_page: defaults::HOME_PAGE.to_owned(),
            launcher_page: defaults::LAUNCHER_PAGE.to_owned(),
            original_page: defaults::ORIGINAL_PAGE.to_owned(),
            required_files: defaults::required_files(),
            game_name: defaults::GAME_NAME.to_owned(),
            game_version: defaults::GAME_VERSION.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn default_page_files() {
        let config = ServiceConfig::default();
        assert_eq!(config.page_file(Page::Home), "localhost-game.html");
        assert_eq!(config.page_file(Page::Launcher), "game-launcher.html");
        assert_eq!(config.page_file(Page::Original), "index.html");
        assert_eq!(
            config.required_files,
            vec!["first-off-game.js", "game-launcher.html"]
        );
    }

    #[test]
    fn reports_missing_required_files() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        fs::write(dir.path().join("game-launcher.html"), "<html></html>")?;

        let config = ServiceConfig::default().with_site_root(dir.path());
        assert_eq!(
            config.missing_required_files(),
            vec![dir.path().join("first-off-game.js")]
        );

        fs::write(dir.path().join("first-off-game.js"), "")?;
        assert!(config.missing_required_files().is_empty());
        Ok(())
    }

    #[test]
    fn reject_missing_site_root() -> anyhow::Result<()> {
        let dir = tempfile::TempDir::new()?;
        let config = ServiceConfig::default().with_site_root(dir.path().join("missing"));
        assert!(matches!(
            config.validate(),
            Err(ServiceError::SiteRootMissing(_))
        ));
        assert!(config.clone().with_site_root(dir.path()).validate().is_ok());
        Ok(())
    }
}
