//! Process bootstrap for a server-rendered web application.
//!
//! Selects the transport (plain HTTP or TLS-terminated HTTPS), mounts the
//! static uploads route ahead of a catch-all that delegates to the
//! embedded application, and validates required environment configuration
//! before the listener binds.
//!
//! # Architecture Overview
//!
//! ```text
//! environment (+ .env)                          uploads/
//!     │                                             │
//!     ▼                                             ▼
//! ┌──────────┐    ┌───────────┐    ┌────────────────────────────┐
//! │ config   │───▶│ lifecycle │───▶│ http router                │
//! │ snapshot │    │ startup   │    │   /uploads → static files  │
//! └──────────┘    └─────┬─────┘    │   *        → application   │
//!                       │          └────────────────────────────┘
//!                       ▼
//!                 ┌───────────┐    certs/localhost{-key,}.pem
//!                 │ net       │◀─────── (PROTOCOL=https only)
//!                 │ transport │
//!                 └───────────┘
//! ```
//!
//! Startup is one asynchronous sequence: resolve configuration, prepare
//! the application, bind the listener, report. Every failure before Ready
//! is fatal; there is no degraded mode.

pub mod app;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;

pub use app::{AppInitError, Application};
pub use config::{EnvSnapshot, Protocol, ServerSettings};
pub use lifecycle::{Bootstrap, ReadyServer, StartupError};
