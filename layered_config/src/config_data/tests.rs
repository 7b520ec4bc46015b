//! Unit tests for per-layer loading.

use rstest::{fixture, rstest};
use serde_json::{Map, Value, json};
use test_helpers::object;

use super::{ConfigData, LoadReport};
use crate::{ConfigError, Definition, Location, Registry, Validator, Warning, WarningKind};

#[fixture]
fn warnings() -> Vec<Warning> {
    Vec::new()
}

fn messages(warnings: &[Warning]) -> Vec<String> {
    warnings.iter().map(Warning::message).collect()
}

#[rstest]
fn rejects_every_entry_of_an_invalid_cli_mapping(mut warnings: Vec<Warning>) {
    let mut config = ConfigData::new(Location::Cli);

    let report = config.load(
        object(json!({
            "hash-algorithm": "notok",
            "unknown-algorithm": "huh",
            "access": "yes please",
        })),
        &mut warnings,
    );

    assert_eq!(config.data(), &Map::new());
    assert_eq!(
        report,
        LoadReport {
            accepted: 0,
            rejected: 3,
            deprecated: 0
        }
    );
    assert_eq!(
        messages(&warnings),
        vec![
            "invalid item `hash-algorithm` set with `notok`, not allowed to be set on config layer `cli`",
            "unknown item `unknown-algorithm` set with `huh`, not allowed to be set",
            r#"invalid item `access` set with `yes please`, Must be one of: "restricted", "public""#,
        ]
    );
}

#[rstest]
fn accepts_valid_entries_beside_invalid_ones(mut warnings: Vec<Warning>) {
    let mut config = ConfigData::new(Location::Project);

    let report = config.load(
        object(json!({
            "access": "public",
            "fetch-retries": "three",
            "hash-algorithm": "sha256",
            "global": true,
        })),
        &mut warnings,
    );

    assert_eq!(
        config.data(),
        &object(json!({"access": "public", "hash-algorithm": "sha256"}))
    );
    assert!(!report.is_clean());
    assert_eq!(report.accepted, 2);
    assert_eq!(
        warnings.iter().map(Warning::key).collect::<Vec<_>>(),
        vec!["fetch-retries", "global"]
    );
    assert!(matches!(
        warnings.last().map(Warning::kind),
        Some(WarningKind::DisallowedLayer {
            location: Location::Project
        })
    ));
}

#[rstest]
fn stores_coerced_values(mut warnings: Vec<Warning>) {
    let mut config = ConfigData::new(Location::Env);
    config.load(
        object(json!({
            "audit": "false",
            "fetch-timeout": "60000",
            "omit": "dev,optional",
            "scope": "acme",
        })),
        &mut warnings,
    );

    assert!(warnings.is_empty());
    assert_eq!(config.get("audit"), Some(&json!(false)));
    assert_eq!(config.get("fetch-timeout"), Some(&json!(60_000)));
    assert_eq!(config.get("omit"), Some(&json!(["dev", "optional"])));
    assert_eq!(config.get("scope"), Some(&json!("@acme")));
}

#[rstest]
fn loading_is_additive(mut warnings: Vec<Warning>) {
    let mut config = ConfigData::new(Location::User);
    config.load(object(json!({"tag": "next"})), &mut warnings);
    config.load(object(json!({"save-exact": true})), &mut warnings);
    config.load(object(json!({"tag": "beta"})), &mut warnings);

    assert_eq!(
        config.data(),
        &object(json!({"tag": "beta", "save-exact": true}))
    );
    assert_eq!(config.len(), 2);
}

#[rstest]
fn reloading_the_same_input_is_idempotent(mut warnings: Vec<Warning>) {
    let raw = object(json!({"loglevel": "warn", "fund": "false"}));
    let mut config = ConfigData::new(Location::Global);
    config.load(raw.clone(), &mut warnings);
    let first = config.data().clone();
    config.load(raw, &mut warnings);

    assert_eq!(config.data(), &first);
    assert!(warnings.is_empty());
}

#[rstest]
fn rejected_reload_keeps_the_previous_value(mut warnings: Vec<Warning>) {
    let mut config = ConfigData::new(Location::Cli);
    config.load(object(json!({"loglevel": "warn"})), &mut warnings);
    config.load(object(json!({"loglevel": "loud"})), &mut warnings);

    assert_eq!(config.get("loglevel"), Some(&json!("warn")));
    assert_eq!(warnings.len(), 1);
}

#[rstest]
fn deprecated_keys_are_accepted_with_a_warning(mut warnings: Vec<Warning>) {
    let mut config = ConfigData::new(Location::User);
    let report = config.load(object(json!({"always-auth": "true"})), &mut warnings);

    assert_eq!(config.get("always-auth"), Some(&json!(true)));
    assert_eq!(report.deprecated, 1);
    assert!(report.is_clean());
    let [warning] = warnings.as_slice() else {
        panic!("expected one warning, got {warnings:?}");
    };
    assert!(matches!(warning.kind(), WarningKind::Deprecated { .. }));
    assert!(warning.message().starts_with("deprecated item `always-auth` set with `true`, "));
}

#[rstest]
fn empty_input_leaves_the_store_empty(mut warnings: Vec<Warning>) {
    let mut config = ConfigData::new(Location::Cli);
    let report = config.load(Map::new(), &mut warnings);
    assert!(config.is_empty());
    assert_eq!(report, LoadReport::default());
    assert!(warnings.is_empty());
}

#[rstest]
fn accepts_pairs_from_any_iterator(mut warnings: Vec<Warning>) {
    let mut config = ConfigData::new(Location::Cli);
    config.load([("tag", json!("next")), ("git", json!("/usr/bin/git"))], &mut warnings);
    assert!(config.contains_key("tag"));
    assert!(config.contains_key("git"));
}

#[test]
fn builds_stores_from_layer_names() {
    let config = ConfigData::for_layer("project").expect("known layer");
    assert_eq!(config.location(), Location::Project);
    assert!(config.source().is_none());

    let err = ConfigData::for_layer("workspace").expect_err("unknown layer");
    assert!(matches!(err, ConfigError::InvalidLocation { name } if name == "workspace"));
}

#[rstest]
fn validates_against_custom_registries(mut warnings: Vec<Warning>) {
    let registry = Registry::new([Definition::new(
        "colour",
        json!("auto"),
        Validator::one_of(&["auto", "always", "never"]),
    )])
    .expect("valid registry");
    let mut config = ConfigData::with_registry(Location::Cli, &registry);
    config.load(
        object(json!({"colour": "never", "tag": "next"})),
        &mut warnings,
    );

    assert_eq!(config.data(), &object(json!({"colour": "never"})));
    assert_eq!(
        messages(&warnings),
        vec!["unknown item `tag` set with `next`, not allowed to be set"]
    );
}

#[rstest]
#[case(json!(null))]
#[case(json!({"nested": true}))]
#[case(json!(["sha1"]))]
fn non_scalar_values_are_rejected(mut warnings: Vec<Warning>, #[case] raw: Value) {
    let mut config = ConfigData::new(Location::User);
    let mut input = Map::new();
    input.insert("tag".into(), raw);
    config.load(input, &mut warnings);
    assert!(config.is_empty());
    assert_eq!(warnings.len(), 1);
}

#[test]
fn records_sources() {
    let mut config = ConfigData::new(Location::User);
    config.set_source("/home/me/.pmrc.toml");
    assert_eq!(config.source(), Some("/home/me/.pmrc.toml"));
    assert_eq!(config.registry().len(), Registry::builtin().len());
}
