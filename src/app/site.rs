//! Compiled-in site application adapter.

use axum::body::Body;
use axum::http::Request;
use axum::response::{Html, Response};
use axum::routing::get;
use axum::Router;
use tower::ServiceExt;

use super::{AppInitError, Application};

/// Mounts the server-rendered site behind [`Application`].
///
/// The site's own route tree stays internal; the server core only ever
/// sees `prepare` and `handle`.
#[derive(Clone)]
pub struct SiteApp {
    routes: Router,
}

impl SiteApp {
    pub fn new() -> Self {
        Self {
            routes: Router::new().route("/", get(index)),
        }
    }
}

impl Default for SiteApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Application for SiteApp {
    async fn prepare(&self) -> Result<(), AppInitError> {
        // No asynchronous warmup yet.
        tracing::debug!("site application prepared");
        Ok(())
    }

    async fn handle(&self, request: Request<Body>) -> Response {
        match self.routes.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

async fn index() -> Html<&'static str> {
    Html("<!doctype html><title>site</title><p>It works.</p>")
}
