//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ .env file)
//!     → env.rs (one-time EnvSnapshot capture)
//!     → env.rs resolve (required/optional key sets → ConfigEntry)
//!     → schema.rs (typed ServerSettings + RuntimeSecrets)
//!     → report.rs (ordered groups → operator summary after Ready)
//! ```
//!
//! # Design Decisions
//! - The snapshot is immutable; nothing re-reads the environment mid-run
//! - Required keys are enforced during startup, before any listener binds
//! - Display grouping is typed and ordered, not string-keyed

pub mod env;
pub mod report;
pub mod schema;

pub use env::{ConfigEntry, ConfigError, EnvSnapshot};
pub use report::{ConfigGroup, ReportError};
pub use schema::{Protocol, RuntimeSecrets, ServerSettings};
