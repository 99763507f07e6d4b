//! The embedded application seam.
//!
//! The server core treats the application as an opaque collaborator: it is
//! prepared once during startup and then handed every request the static
//! route does not claim. Rendering, page routing, and data access all live
//! on the other side of this trait.

use std::future::Future;

use axum::body::Body;
use axum::http::Request;
use axum::response::Response;
use thiserror::Error;

pub mod site;

pub use site::SiteApp;

/// Error surfaced when the embedded application fails its own startup
/// sequence. Always fatal; propagated without retry.
#[derive(Debug, Error)]
#[error("application failed to initialize: {0}")]
pub struct AppInitError(#[source] Box<dyn std::error::Error + Send + Sync>);

impl AppInitError {
    pub fn new(source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self(source.into())
    }
}

/// The embedded request-handling application.
///
/// `prepare` is the single pre-bind suspension point in the startup
/// sequence; `handle` receives every delegated request verbatim.
pub trait Application: Send + Sync + 'static {
    /// Run the application's own asynchronous initialization.
    fn prepare(&self) -> impl Future<Output = Result<(), AppInitError>> + Send;

    /// Produce the response for a delegated request.
    fn handle(&self, request: Request<Body>) -> impl Future<Output = Response> + Send;
}
