//! Builtin package-manager settings.

use serde_json::{Value, json};

use super::{Definition, Validator, ValueType};
use crate::{Location, LocationSet};

/// Integrity algorithms accepted by `hash-algorithm`.
pub const SUPPORTED_HASH_ALGORITHMS: [&str; 4] = ["sha1", "sha256", "sha384", "sha512"];

const FILE_LAYERS: LocationSet = LocationSet::of(&[
    Location::Default,
    Location::Builtin,
    Location::Global,
    Location::User,
    Location::Project,
]);

const INVOCATION_LAYERS: LocationSet = LocationSet::of(&[Location::Cli, Location::Env]);

fn boolean(key: &'static str, default: bool) -> Definition {
    Definition::new(key, Value::Bool(default), Validator::Type(ValueType::Boolean))
}

fn typed(key: &'static str, default: Value, kind: ValueType) -> Definition {
    Definition::new(key, default, Validator::Type(kind))
}

fn is_supported_hash(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|name| SUPPORTED_HASH_ALGORITHMS.contains(&name))
}

fn semver_version(value: &Value) -> Result<Value, String> {
    const REQUIREMENT: &str = "Must be a full valid SemVer string";
    let text = value.as_str().ok_or(REQUIREMENT)?.trim();
    semver::Version::parse(text.strip_prefix('v').unwrap_or(text))
        .map(|version| Value::String(version.to_string()))
        .map_err(|_| REQUIREMENT.to_owned())
}

fn scope_name(value: &Value) -> Result<Value, String> {
    const REQUIREMENT: &str = "Must be a scope name such as @acme";
    let text = value.as_str().ok_or(REQUIREMENT)?.trim();
    if text.is_empty() {
        return Ok(Value::String(String::new()));
    }
    let bare = text.strip_prefix('@').unwrap_or(text);
    let valid = !bare.is_empty()
        && bare
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || "-._~".contains(ch));
    if valid {
        Ok(Value::String(format!("@{bare}")))
    } else {
        Err(REQUIREMENT.to_owned())
    }
}

/// The builtin definition table.
pub(super) fn definitions() -> Vec<Definition> {
    vec![
        Definition::new(
            "access",
            Value::Null,
            Validator::one_of(&["restricted", "public"]).nullable(),
        )
        .describe("Visibility of newly published scoped packages."),
        boolean("always-auth", false).deprecated(
            "This option has been removed; credentials are sent whenever a token is configured.",
        ),
        boolean("audit", true).describe("Submit audit reports alongside installs."),
        Definition::new(
            "audit-level",
            Value::Null,
            Validator::one_of(&["info", "low", "moderate", "high", "critical", "none"])
                .nullable(),
        )
        .describe("Minimum vulnerability level that fails an audit."),
        typed("cache", json!("~/.pm/cache"), ValueType::Path)
            .describe("Directory holding the package cache."),
        boolean("engine-strict", false)
            .describe("Refuse packages whose engines do not match the runtime."),
        typed("fetch-retries", json!(2), ValueType::Integer)
            .describe("Retries for failed registry requests."),
        typed("fetch-retry-factor", json!(10), ValueType::Number)
            .describe("Exponential backoff factor between retries."),
        typed("fetch-timeout", json!(300_000), ValueType::Integer)
            .describe("Request timeout in milliseconds."),
        boolean("fund", true).describe("Show funding notices after installs."),
        typed("git", json!("git"), ValueType::String)
            .describe("Command used to run git."),
        boolean("global", false)
            .allowed_on(INVOCATION_LAYERS)
            .describe("Operate on the global installation instead of the project."),
        Definition::new(
            "globalconfig",
            Value::Null,
            Validator::Type(ValueType::Path).nullable(),
        )
        .allowed_on(LocationSet::of(&[
            Location::Default,
            Location::Builtin,
            Location::Env,
            Location::Cli,
        ]))
        .describe("Path of the global configuration file."),
        Definition::new(
            "hash-algorithm",
            json!("sha512"),
            Validator::Predicate {
                description: "Must be one of the supported hash algorithms: sha1, sha256, sha384, sha512",
                check: is_supported_hash,
            },
        )
        .allowed_on(FILE_LAYERS)
        .describe("Integrity algorithm recorded in the lockfile."),
        Definition::new(
            "init-version",
            json!("1.0.0"),
            Validator::Custom {
                name: "semver",
                check: semver_version,
            },
        )
        .describe("Version given to newly initialised packages."),
        boolean("legacy-peer-deps", false)
            .describe("Skip automatic installation of peer dependencies."),
        Definition::new(
            "loglevel",
            json!("notice"),
            Validator::one_of(&[
                "silent", "error", "warn", "notice", "http", "info", "verbose", "silly",
            ]),
        )
        .describe("Minimum level of log output."),
        Definition::new(
            "omit",
            json!([]),
            Validator::one_of(&["dev", "optional", "peer"]).list(),
        )
        .describe("Dependency types left out of the installed tree."),
        boolean("package-lock", true).describe("Read and write the lockfile."),
        Definition::new(
            "prefix",
            Value::Null,
            Validator::Type(ValueType::Path).nullable(),
        )
        .allowed_on(LocationSet::ALL.without(Location::Project))
        .describe("Installation prefix for global packages."),
        typed(
            "registry",
            json!("https://registry.npmjs.org/"),
            ValueType::Url,
        )
        .describe("Base URL of the package registry."),
        boolean("save-exact", false).describe("Save exact versions instead of ranges."),
        typed("save-prefix", json!("^"), ValueType::String)
            .describe("Range operator prefixed to saved versions."),
        Definition::new(
            "scope",
            json!(""),
            Validator::Custom {
                name: "scope",
                check: scope_name,
            },
        )
        .describe("Scope applied to newly initialised packages."),
        boolean("strict-ssl", true).describe("Verify TLS certificates of the registry."),
        typed("tag", json!("latest"), ValueType::String)
            .describe("Dist-tag used when no version is requested."),
        typed("userconfig", json!("~/.pmrc.toml"), ValueType::Path)
            .allowed_on(LocationSet::ALL.without(Location::User).without(Location::Project))
            .describe("Path of the per-user configuration file."),
    ]
}
