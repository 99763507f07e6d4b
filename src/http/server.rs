//! Router construction and request delegation.
//!
//! # Responsibilities
//! - Mount the static uploads route ahead of the catch-all
//! - Delegate every other request to the embedded application untouched
//!
//! # Design Decisions
//! - Exactly two mounts; the table is built once and never mutated
//! - A missing upload answers 404 from the static service itself and is
//!   never forwarded to the application
//! - The delegate does not transform, buffer, or inspect requests

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::response::Response;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::app::Application;

/// Path prefix claimed by the static route.
pub const UPLOADS_PREFIX: &str = "/uploads";

/// Shared state handed to the delegate handler.
pub struct AppState<A> {
    app: Arc<A>,
}

impl<A> Clone for AppState<A> {
    fn clone(&self) -> Self {
        Self {
            app: self.app.clone(),
        }
    }
}

/// Build the two-route table: static uploads first, then the catch-all
/// delegating to the application. The static mount must take precedence;
/// the catch-all would otherwise shadow uploaded files.
pub fn build_router<A: Application>(uploads_dir: &Path, app: Arc<A>) -> Router {
    Router::new()
        .nest_service(UPLOADS_PREFIX, ServeDir::new(uploads_dir))
        .fallback(delegate::<A>)
        .with_state(AppState { app })
        .layer(TraceLayer::new_for_http())
}

/// Catch-all: hand the request to the embedded application verbatim.
async fn delegate<A: Application>(
    State(state): State<AppState<A>>,
    request: Request<Body>,
) -> Response {
    state.app.handle(request).await
}
