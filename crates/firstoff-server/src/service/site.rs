//! Named pages and their files under the site root.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumIter, IntoEnumIterator};

use crate::service::ServiceConfig;

/// Pages reachable through a fixed route.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr, EnumIter,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// The localhost build of the game.
    Home,
    /// The game launcher, also served in place of any missing file.
    Launcher,
    /// The original version of the game.
    Original,
}

impl Page {
    /// Returns the route path this page is served at.
    #[must_use]
    pub const fn route(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Launcher => "/game",
            Self::Original => "/original",
        }
    }

    /// Returns every page in routing order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

/// Resolved locations of the site root and its named pages.
#[derive(Debug, Clone)]
#[must_use]
pub struct SiteFiles {
    inner: Arc<SiteFilesInner>,
}

#[derive(Debug)]
struct SiteFilesInner {
    root: PathBuf,
    home: PathBuf,
    launcher: PathBuf,
    original: PathBuf,
}

impl SiteFiles {
    /// Resolves page files relative to the configured site root.
    pub fn from_config(config: &ServiceConfig) -> Self {
        let root = config.site_root.clone();
        let resolve = |page: Page| root.join(config.page_file(page));

        let inner = SiteFilesInner {
            home: resolve(Page::Home),
            launcher: resolve(Page::Launcher),
            original: resolve(Page::Original),
            root,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    /// Returns the directory static files are served from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.inner.root
    }

    /// Returns the file configured for `page`.
    #[must_use]
    pub fn page_path(&self, page: Page) -> &Path {
        match page {
            Page::Home => &self.inner.home,
            Page::Launcher => &self.inner.launcher,
            Page::Original => &self.inner.original,
        }
    }

    /// Returns the page served when a requested file does not exist.
    #[must_use]
    pub fn fallback_path(&self) -> &Path {
        self.page_path(Page::Launcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_have_distinct_routes() {
        let routes: Vec<&str> = Page::all().map(Page::route).collect();
        assert_eq!(routes, vec!["/", "/game", "/original"]);
    }

    #[test]
    fn page_paths_are_under_site_root() {
        let config = ServiceConfig::default().with_site_root("/srv/game");
        let site = SiteFiles::from_config(&config);

        assert_eq!(site.root(), Path::new("/srv/game"));
        assert_eq!(
            site.page_path(Page::Original),
            Path::new("/srv/game/index.html")
        );
        assert_eq!(
            site.fallback_path(),
            Path::new("/srv/game/game-launcher.html")
        );
    }
}
