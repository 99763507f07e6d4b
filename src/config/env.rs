//! Environment capture and resolution.
//!
//! # Responsibilities
//! - Capture the process environment once, as an immutable snapshot
//! - Resolve required keys (present and non-empty) or fail startup
//! - Resolve optional keys to their value or an explicit absence
//!
//! # Design Decisions
//! - Components never read the ambient environment; they resolve against
//!   an injected snapshot, so resolution is a pure function
//! - Present-but-empty is an error for required keys but a value for
//!   optional ones (an operator explicitly set it)
//! - The snapshot is captured before any resolution and never refreshed

use std::collections::BTreeMap;

use thiserror::Error;

/// Errors raised while resolving configuration from the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Required key has no entry in the environment at all.
    #[error("{0} is not set at startup")]
    MissingKey(String),

    /// Required key is present but holds the empty string.
    #[error("{0} is set but empty at startup")]
    EmptyValue(String),

    /// Key is present but its value cannot be interpreted.
    #[error("{key} is invalid: {reason}")]
    Invalid { key: String, reason: String },
}

/// One-time capture of the process environment.
///
/// Everything downstream resolves against this value; nothing reads the
/// ambient environment after it is taken.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment.
    pub fn from_os() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    /// Build a snapshot from explicit pairs. Used by tests and embedders.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Copy of the snapshot with one entry added or replaced.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(key.into(), value.into());
        self
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Resolve a required key: present and non-empty, or a fatal error.
    pub fn require(&self, key: &str) -> Result<String, ConfigError> {
        match self.vars.get(key) {
            None => Err(ConfigError::MissingKey(key.to_string())),
            Some(value) if value.is_empty() => Err(ConfigError::EmptyValue(key.to_string())),
            Some(value) => Ok(value.clone()),
        }
    }

    /// Resolve an optional key. Absence is never an error; an empty string
    /// is a value.
    pub fn optional(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// A resolved configuration value, as consumed by the startup reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub key: String,
    pub value: Option<String>,
    pub required: bool,
    /// Secret-bearing entries are redacted by the reporter.
    pub secret: bool,
}

/// Required/optional key sets resolved together.
#[derive(Debug, Clone, Copy)]
pub struct KeySpec {
    pub required: &'static [&'static str],
    pub optional: &'static [&'static str],
}

/// Resolve a key set against the snapshot.
///
/// Entries come back in spec order, required keys first. Any missing or
/// empty required key aborts resolution.
pub fn resolve(snapshot: &EnvSnapshot, spec: &KeySpec) -> Result<Vec<ConfigEntry>, ConfigError> {
    let mut entries = Vec::with_capacity(spec.required.len() + spec.optional.len());
    for key in spec.required {
        entries.push(ConfigEntry {
            key: (*key).to_string(),
            value: Some(snapshot.require(key)?),
            required: true,
            secret: false,
        });
    }
    for key in spec.optional {
        entries.push(ConfigEntry {
            key: (*key).to_string(),
            value: snapshot.optional(key),
            required: false,
            secret: false,
        });
    }
    Ok(entries)
}
