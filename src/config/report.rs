//! Startup configuration reporting.
//!
//! # Responsibilities
//! - Group resolved entries under labeled, ordered sections
//! - Render one `key: value` line per entry for the operator log
//! - Show unset optionals explicitly instead of omitting them
//!
//! # Design Decisions
//! - Groups are a typed ordered list; no sentinel separator keys
//! - Unset values render a literal `null` so operators can scan for gaps
//! - Secret values render `<redacted>`; the startup log is not a
//!   credential store
//! - Rendering runs after the listener is up and must never unwind it

use thiserror::Error;

use super::env::{resolve, ConfigEntry, ConfigError, EnvSnapshot, KeySpec};
use super::schema::RuntimeSecrets;

/// Marker rendered for an unset optional value.
pub const NULL_MARKER: &str = "null";
/// Marker rendered in place of a set secret value.
pub const REDACTED_MARKER: &str = "<redacted>";

const SEPARATOR: &str = "--------------";

const NODE_KEYS: KeySpec = KeySpec {
    required: &["NODE_ENV", "PORT"],
    optional: &[],
};

const BUILDTIME_KEYS: KeySpec = KeySpec {
    required: &[],
    optional: &[
        "NEXT_PUBLIC_BASE_URL",
        "NEXT_PUBLIC_POSTS_PER_PAGE",
        "NEXT_PUBLIC_USERS_PER_PAGE",
        "NEXT_PUBLIC_DEFAULT_THEME",
    ],
};

const ENV_KEYS: KeySpec = KeySpec {
    required: &["NEXTAUTH_URL"],
    optional: &["PROTOCOL", "HOSTNAME"],
};

const DATABASE_KEYS: KeySpec = KeySpec {
    required: &["DATABASE_URL"],
    optional: &[],
};

/// An ordered, labeled run of configuration entries. Insertion order is
/// display order.
#[derive(Debug, Clone)]
pub struct ConfigGroup {
    pub label: String,
    pub entries: Vec<ConfigEntry>,
}

impl ConfigGroup {
    pub fn new(label: impl Into<String>, entries: Vec<ConfigEntry>) -> Self {
        Self {
            label: label.into(),
            entries,
        }
    }
}

/// Non-fatal rendering failure; logged and swallowed after Ready.
#[derive(Debug, PartialEq, Eq, Error)]
pub enum ReportError {
    #[error("configuration group has no label")]
    UnlabeledGroup,
}

/// Build the canonical startup groups.
///
/// Resolving the required groups here is what enforces presence of every
/// required key before the listener starts.
pub fn startup_groups(
    snapshot: &EnvSnapshot,
    secrets: &RuntimeSecrets,
) -> Result<Vec<ConfigGroup>, ConfigError> {
    Ok(vec![
        ConfigGroup::new("node", resolve(snapshot, &NODE_KEYS)?),
        ConfigGroup::new("buildtime", resolve(snapshot, &BUILDTIME_KEYS)?),
        ConfigGroup::new("env", resolve(snapshot, &ENV_KEYS)?),
        ConfigGroup::new("database", resolve(snapshot, &DATABASE_KEYS)?),
        ConfigGroup::new("runtime-secret", secret_entries(secrets)),
    ])
}

fn secret_entries(secrets: &RuntimeSecrets) -> Vec<ConfigEntry> {
    [
        ("SECRET", &secrets.secret),
        ("FACEBOOK_CLIENT_ID", &secrets.facebook_client_id),
        ("FACEBOOK_CLIENT_SECRET", &secrets.facebook_client_secret),
        ("GOOGLE_CLIENT_ID", &secrets.google_client_id),
        ("GOOGLE_CLIENT_SECRET", &secrets.google_client_secret),
    ]
    .into_iter()
    .map(|(key, value)| ConfigEntry {
        key: key.to_string(),
        value: value.clone(),
        required: false,
        secret: true,
    })
    .collect()
}

/// Render groups for the operator log, preserving group and entry order
/// exactly as supplied.
pub fn render(groups: &[ConfigGroup]) -> Result<String, ReportError> {
    let mut out = String::new();
    for group in groups {
        if group.label.is_empty() {
            return Err(ReportError::UnlabeledGroup);
        }
        out.push_str(SEPARATOR);
        out.push(' ');
        out.push_str(&group.label);
        out.push('\n');
        for entry in &group.entries {
            out.push_str(&entry.key);
            out.push_str(": ");
            out.push_str(match &entry.value {
                None => NULL_MARKER,
                Some(_) if entry.secret => REDACTED_MARKER,
                Some(value) => value,
            });
            out.push('\n');
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(key: &str, value: Option<&str>) -> ConfigEntry {
        ConfigEntry {
            key: key.to_string(),
            value: value.map(str::to_string),
            required: false,
            secret: false,
        }
    }

    fn full_snapshot() -> EnvSnapshot {
        EnvSnapshot::from_pairs([
            ("NODE_ENV", "production"),
            ("PORT", "3001"),
            ("NEXTAUTH_URL", "https://example.com/api/auth"),
            ("DATABASE_URL", "postgres://site@localhost/site"),
        ])
    }

    #[test]
    fn renders_groups_in_order_with_null_markers() {
        let groups = vec![
            ConfigGroup::new("first", vec![entry("A", Some("1")), entry("B", None)]),
            ConfigGroup::new("second", vec![entry("C", Some(""))]),
        ];

        let rendered = render(&groups).unwrap();
        assert_eq!(
            rendered,
            "-------------- first\nA: 1\nB: null\n-------------- second\nC: \n"
        );
    }

    #[test]
    fn set_secrets_are_redacted_and_unset_secrets_render_null() {
        let secrets = RuntimeSecrets {
            secret: Some("s3cr3t".to_string()),
            ..RuntimeSecrets::default()
        };
        let groups = vec![ConfigGroup::new("runtime-secret", secret_entries(&secrets))];

        let rendered = render(&groups).unwrap();
        assert!(rendered.contains("SECRET: <redacted>\n"));
        assert!(rendered.contains("GOOGLE_CLIENT_ID: null\n"));
        assert!(!rendered.contains("s3cr3t"));
    }

    #[test]
    fn unlabeled_group_is_an_error_not_a_panic() {
        let groups = vec![ConfigGroup::new("", vec![entry("A", Some("1"))])];
        assert_eq!(render(&groups).unwrap_err(), ReportError::UnlabeledGroup);
    }

    #[test]
    fn startup_groups_enforce_required_keys() {
        let snapshot = full_snapshot();
        let secrets = RuntimeSecrets::default();
        let groups = startup_groups(&snapshot, &secrets).unwrap();
        assert_eq!(
            groups.iter().map(|g| g.label.as_str()).collect::<Vec<_>>(),
            ["node", "buildtime", "env", "database", "runtime-secret"]
        );

        let broken = EnvSnapshot::from_pairs([("NODE_ENV", "production"), ("PORT", "3001")]);
        assert!(matches!(
            startup_groups(&broken, &secrets),
            Err(ConfigError::MissingKey(ref key)) if key == "NEXTAUTH_URL"
        ));
    }

    #[test]
    fn required_keys_never_render_null_on_success() {
        let groups = startup_groups(&full_snapshot(), &RuntimeSecrets::default()).unwrap();
        let rendered = render(&groups).unwrap();

        for line in rendered.lines() {
            if let Some((key, value)) = line.split_once(": ") {
                let required = ["NODE_ENV", "PORT", "NEXTAUTH_URL", "DATABASE_URL"];
                if required.contains(&key) {
                    assert_ne!(value, NULL_MARKER, "{key} rendered null");
                }
            }
        }
    }
}
