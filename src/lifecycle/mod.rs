//! Startup lifecycle.
//!
//! # Data Flow
//! ```text
//! Initializing     : snapshot → resolved groups → typed settings
//! PreparingApp     : embedded application async init
//! StartingListener : router → transport → bind 0.0.0.0:{PORT}
//! Ready            : startup line → one-shot config report → accept loop
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then the application, listener last
//! - Every pre-Ready failure is terminal and exits the process non-zero
//! - There is no degraded mode; the server is fully ready or not running

pub mod startup;

pub use startup::{Bootstrap, ReadyServer, Stage, StartupError};
