//! Named page routes and static file fallback.
//!
//! Each [`Page`] is served from its configured file. A page whose file is
//! missing is answered with the game launcher instead. Any other path is
//! looked up under the site root, again falling back to the launcher.

use std::path::Path;

use axum::Router;
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use tower::ServiceExt;
use tower_http::services::{ServeDir, ServeFile};

use crate::handler::{ErrorKind, Result};
use crate::service::{Page, ServiceState, SiteFiles};

/// Tracing target for page resolution.
const TRACING_TARGET: &str = "firstoff_server::handler::pages";

/// Serves the file behind `page`, or the launcher if that file is missing.
#[tracing::instrument(skip_all, fields(page = page.as_ref()))]
async fn serve_page(page: Page, site: SiteFiles, request: Request) -> Result<Response> {
    let requested = site.page_path(page);

    let path = match is_existing_file(requested).await {
        Ok(true) => requested,
        Ok(false) => {
            tracing::debug!(
                target: TRACING_TARGET,
                requested = %requested.display(),
                fallback = %site.fallback_path().display(),
                "page file missing, serving fallback"
            );
            site.fallback_path()
        }
        Err(err) => {
            tracing::error!(
                target: TRACING_TARGET,
                requested = %requested.display(),
                error = %err,
                "failed to resolve page file"
            );

            return Err(ErrorKind::InternalServerError
                .with_message("Server error")
                .with_context(err.to_string()));
        }
    };

    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    Ok(response.into_response())
}

async fn is_existing_file(path: &Path) -> std::io::Result<bool> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Returns the service answering every path without a route.
pub(crate) fn static_files(site: &SiteFiles) -> ServeDir<ServeFile> {
    ServeDir::new(site.root()).fallback(ServeFile::new(site.fallback_path()))
}

/// Returns a [`Router`] with one route per [`Page`].
pub fn routes() -> Router<ServiceState> {
    Page::all().fold(Router::new(), |router, page| {
        router.route(
            page.route(),
            get(move |State(site): State<SiteFiles>, request: Request| {
                serve_page(page, site, request)
            }),
        )
    })
}
