//! Typed settings derived from the environment snapshot.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::env::{ConfigError, EnvSnapshot};

/// Wire protocol the listener terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    #[default]
    Http,
    Https,
}

impl Protocol {
    /// Only the exact flag value `https` selects TLS; any other value,
    /// including absence, falls back to plain HTTP without error.
    pub fn from_flag(flag: Option<&str>) -> Self {
        match flag {
            Some("https") => Self::Https,
            _ => Self::Http,
        }
    }

    /// URL scheme for display.
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

/// Server settings resolved once at startup and threaded through every
/// component as a value.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    /// Deployment environment name (`NODE_ENV`).
    pub env_name: String,

    /// Development mode: any environment name other than `production` or
    /// `test`.
    pub dev: bool,

    /// Listener port (`PORT`). Always required; there is no fallback.
    pub port: u16,

    /// Listener protocol (`PROTOCOL`).
    pub protocol: Protocol,

    /// Host shown in the startup line (`HOSTNAME`).
    pub hostname: Option<String>,

    /// Auth callback base URL (`NEXTAUTH_URL`). Opaque to the server core.
    pub auth_url: String,

    /// Database connection string (`DATABASE_URL`). Opaque to the server
    /// core.
    pub database_url: String,

    /// Application root; `certs/` and `uploads/` live beneath it.
    pub root: PathBuf,
}

impl ServerSettings {
    /// Resolve the typed settings, enforcing every required key.
    pub fn from_snapshot(snapshot: &EnvSnapshot, root: PathBuf) -> Result<Self, ConfigError> {
        let env_name = snapshot.require("NODE_ENV")?;
        let port_raw = snapshot.require("PORT")?;
        let port: u16 = port_raw.parse().map_err(|_| ConfigError::Invalid {
            key: "PORT".to_string(),
            reason: format!("expected an integer port, got {port_raw:?}"),
        })?;

        Ok(Self {
            dev: is_dev(&env_name),
            env_name,
            port,
            protocol: Protocol::from_flag(snapshot.optional("PROTOCOL").as_deref()),
            hostname: snapshot.optional("HOSTNAME"),
            auth_url: snapshot.require("NEXTAUTH_URL")?,
            database_url: snapshot.require("DATABASE_URL")?,
            root,
        })
    }

    /// Directory holding the TLS key and certificate.
    pub fn certs_dir(&self) -> PathBuf {
        self.root.join("certs")
    }

    /// Directory served under the static uploads route.
    pub fn uploads_dir(&self) -> PathBuf {
        self.root.join("uploads")
    }

    /// Host for the startup line; `localhost` when `HOSTNAME` is unset.
    pub fn display_host(&self) -> &str {
        self.hostname.as_deref().unwrap_or("localhost")
    }
}

fn is_dev(env_name: &str) -> bool {
    !matches!(env_name, "production" | "test")
}

/// Secret-bearing values sourced through the runtime-config seam rather
/// than the plain environment groups. All optional; presence is a
/// deployment concern, not a startup contract.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RuntimeSecrets {
    pub secret: Option<String>,
    pub facebook_client_id: Option<String>,
    pub facebook_client_secret: Option<String>,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
}

impl RuntimeSecrets {
    pub fn from_snapshot(snapshot: &EnvSnapshot) -> Self {
        Self {
            secret: snapshot.optional("SECRET"),
            facebook_client_id: snapshot.optional("FACEBOOK_CLIENT_ID"),
            facebook_client_secret: snapshot.optional("FACEBOOK_CLIENT_SECRET"),
            google_client_id: snapshot.optional("GOOGLE_CLIENT_ID"),
            google_client_secret: snapshot.optional("GOOGLE_CLIENT_SECRET"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_snapshot() -> EnvSnapshot {
        EnvSnapshot::from_pairs([
            ("NODE_ENV", "production"),
            ("PORT", "3001"),
            ("NEXTAUTH_URL", "https://example.com/api/auth"),
            ("DATABASE_URL", "postgres://site@localhost/site"),
        ])
    }

    #[test]
    fn resolves_typed_settings() {
        let settings = ServerSettings::from_snapshot(&full_snapshot(), PathBuf::from(".")).unwrap();

        assert_eq!(settings.env_name, "production");
        assert!(!settings.dev);
        assert_eq!(settings.port, 3001);
        assert_eq!(settings.protocol, Protocol::Http);
        assert_eq!(settings.hostname, None);
        assert_eq!(settings.display_host(), "localhost");
    }

    #[test]
    fn dev_mode_tracks_environment_name() {
        for (name, dev) in [("production", false), ("test", false), ("development", true)] {
            let snapshot = full_snapshot().with("NODE_ENV", name);
            let settings =
                ServerSettings::from_snapshot(&snapshot, PathBuf::from(".")).unwrap();
            assert_eq!(settings.dev, dev, "NODE_ENV={name}");
        }
    }

    #[test]
    fn non_integer_port_is_invalid() {
        let snapshot = full_snapshot().with("PORT", "not-a-port");
        assert!(matches!(
            ServerSettings::from_snapshot(&snapshot, PathBuf::from(".")),
            Err(ConfigError::Invalid { ref key, .. }) if key == "PORT"
        ));
    }

    #[test]
    fn missing_required_key_fails_resolution() {
        let snapshot = EnvSnapshot::from_pairs([("NODE_ENV", "test"), ("PORT", "3001")]);
        assert_eq!(
            ServerSettings::from_snapshot(&snapshot, PathBuf::from(".")).unwrap_err(),
            ConfigError::MissingKey("NEXTAUTH_URL".to_string())
        );
    }

    #[test]
    fn https_flag_must_match_exactly() {
        let settings = ServerSettings::from_snapshot(
            &full_snapshot().with("PROTOCOL", "https"),
            PathBuf::from("."),
        )
        .unwrap();
        assert_eq!(settings.protocol, Protocol::Https);

        let settings = ServerSettings::from_snapshot(
            &full_snapshot().with("PROTOCOL", "HTTPS"),
            PathBuf::from("."),
        )
        .unwrap();
        assert_eq!(settings.protocol, Protocol::Http);
    }

    #[test]
    fn runtime_secrets_are_all_optional() {
        let secrets = RuntimeSecrets::from_snapshot(&full_snapshot());
        assert_eq!(secrets.secret, None);
        assert_eq!(secrets.google_client_id, None);

        let secrets =
            RuntimeSecrets::from_snapshot(&full_snapshot().with("SECRET", "s3cr3t"));
        assert_eq!(secrets.secret.as_deref(), Some("s3cr3t"));
    }
}
