//! Unit tests for the builtin registry and registry construction.

use rstest::rstest;
use serde_json::{Value, json};

use super::{Definition, Registry, Validator, ValueType, builtin};
use crate::{ConfigError, Location};

#[test]
fn builtin_table_passes_registry_validation() {
    let checked = Registry::new(builtin::definitions()).expect("builtin table is consistent");
    assert_eq!(checked.len(), Registry::builtin().len());
    assert!(checked.keys().eq(Registry::builtin().keys()));
    assert_eq!(checked.defaults(), Registry::builtin().defaults());
}

#[rstest]
#[case("access", Value::Null)]
#[case("hash-algorithm", json!("sha512"))]
#[case("loglevel", json!("notice"))]
#[case("omit", json!([]))]
#[case("registry", json!("https://registry.npmjs.org/"))]
fn builtin_defaults(#[case] key: &str, #[case] expected: Value) {
    let definition = Registry::builtin().require(key).expect("builtin key");
    assert_eq!(definition.default_value(), &expected);
}

#[rstest]
#[case("hash-algorithm", Location::Cli, false)]
#[case("hash-algorithm", Location::Project, true)]
#[case("global", Location::Project, false)]
#[case("global", Location::Env, true)]
#[case("userconfig", Location::User, false)]
#[case("userconfig", Location::Cli, true)]
#[case("prefix", Location::Project, false)]
#[case("tag", Location::Project, true)]
fn builtin_allowed_layers(#[case] key: &str, #[case] location: Location, #[case] allowed: bool) {
    let definition = Registry::builtin().require(key).expect("builtin key");
    assert_eq!(definition.is_allowed_on(location), allowed);
}

#[test]
fn always_auth_is_deprecated() {
    let definition = Registry::builtin().require("always-auth").expect("builtin key");
    assert!(definition.deprecation().is_some());
    assert!(Registry::builtin()
        .require("audit")
        .expect("builtin key")
        .deprecation()
        .is_none());
}

#[rstest]
#[case("hash-algorithm", json!("sha256"), Ok(json!("sha256")))]
#[case("hash-algorithm", json!("md5"), Err(()))]
#[case("init-version", json!("v2.1.0"), Ok(json!("2.1.0")))]
#[case("init-version", json!("two"), Err(()))]
#[case("init-version", json!("vv1.0.0"), Err(()))]
#[case("init-version", json!(" 1.2.3 "), Ok(json!("1.2.3")))]
#[case("scope", json!("acme"), Ok(json!("@acme")))]
#[case("scope", json!("@acme-corp"), Ok(json!("@acme-corp")))]
#[case("scope", json!(""), Ok(json!("")))]
#[case("scope", json!("@Bad Scope"), Err(()))]
fn builtin_custom_checks(#[case] key: &str, #[case] raw: Value, #[case] expected: Result<Value, ()>) {
    let definition = Registry::builtin().require(key).expect("builtin key");
    assert_eq!(definition.check(&raw).map_err(|_| ()), expected);
}

#[test]
fn lookup_unknown_key() {
    assert!(Registry::builtin().lookup("unknown-algorithm").is_none());
    let err = Registry::builtin()
        .require("unknown-algorithm")
        .expect_err("unknown key");
    assert!(err.is_unknown_key());
}

#[test]
fn rejects_duplicate_definitions() {
    let err = Registry::new([
        Definition::new("tag", json!("latest"), Validator::Type(ValueType::String)),
        Definition::new("tag", json!("next"), Validator::Type(ValueType::String)),
    ])
    .expect_err("duplicate key");
    assert!(matches!(err, ConfigError::DuplicateDefinition { key } if key == "tag"));
}

#[test]
fn rejects_defaults_failing_their_validator() {
    let err = Registry::new([Definition::new(
        "fetch-retries",
        json!("many"),
        Validator::Type(ValueType::Integer),
    )])
    .expect_err("invalid default");
    let ConfigError::InvalidDefault { key, message } = err else {
        panic!("expected invalid default");
    };
    assert_eq!(key, "fetch-retries");
    assert_eq!(message, ValueType::Integer.requirement());
}

#[test]
fn defaults_cover_every_key() {
    let registry = Registry::builtin();
    let defaults = registry.defaults();
    assert_eq!(defaults.len(), registry.len());
    assert_eq!(defaults.get("tag"), Some(&json!("latest")));
}

#[rstest]
#[case(json!("TRUE"), Validator::Type(ValueType::Boolean), json!(true))]
#[case(json!("42"), Validator::Type(ValueType::Integer), json!(42))]
#[case(json!("dev, peer"), Validator::one_of(&["dev", "peer"]).list(), json!(["dev", "peer"]))]
fn registries_store_coerced_defaults(
    #[case] default: Value,
    #[case] validator: Validator,
    #[case] expected: Value,
) {
    let registry =
        Registry::new([Definition::new("setting", default, validator)]).expect("valid default");
    let definition = registry.require("setting").expect("defined");
    assert_eq!(definition.default_value(), &expected);
    assert_eq!(registry.defaults().get("setting"), Some(&expected));
}
