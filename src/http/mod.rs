//! HTTP routing surface.
//!
//! # Data Flow
//! ```text
//! bound transport (HTTP or TLS)
//!     → server.rs router
//!         /uploads/** → static files from the uploads directory
//!         everything else → embedded application handler, verbatim
//! ```

pub mod server;

pub use server::build_router;
