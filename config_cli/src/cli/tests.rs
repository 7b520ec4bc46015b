//! Unit tests for argument parsing.

use clap::Parser;
use rstest::rstest;
use serde_json::{Value, json};

use super::{CommandLine, Commands, parse_setting};

#[rstest]
#[case("tag=next", "tag", json!("next"))]
#[case("save-exact", "save-exact", json!(true))]
#[case("registry=https://r.example/?a=b", "registry", json!("https://r.example/?a=b"))]
#[case("scope=", "scope", json!(""))]
#[case(" loglevel =warn", "loglevel", json!("warn"))]
fn parses_settings(#[case] raw: &str, #[case] key: &str, #[case] value: Value) {
    let setting = parse_setting(raw).expect("valid setting");
    assert_eq!(setting.key, key);
    assert_eq!(setting.value, value);
}

#[rstest]
#[case("=value")]
#[case("")]
fn rejects_settings_without_a_key(#[case] raw: &str) {
    assert!(parse_setting(raw).is_err());
}

#[test]
fn later_settings_win_and_keep_first_position() {
    let cli = CommandLine::try_parse_from([
        "pm-config", "--set", "tag=a", "--set", "fund=false", "--set", "tag=b", "list",
    ])
    .expect("parses");
    let raw = cli.globals.cli_mapping();
    assert_eq!(raw.keys().collect::<Vec<_>>(), vec!["tag", "fund"]);
    assert_eq!(raw.get("tag"), Some(&json!("b")));
}

#[test]
fn global_switches_follow_the_subcommand() {
    let cli = CommandLine::try_parse_from([
        "pm-config",
        "get",
        "tag",
        "--project-dir",
        "/work/app",
        "--env-prefix",
        "ACME_",
    ])
    .expect("parses");
    let options = cli.globals.load_options();
    assert_eq!(options.env_prefix(), "ACME_");
    assert_eq!(options.project_dir().map(|dir| dir.as_str()), Some("/work/app"));
    assert!(matches!(cli.command, Commands::Get(ref get) if get.keys == ["tag"]));
}

#[test]
fn get_requires_a_key() {
    assert!(CommandLine::try_parse_from(["pm-config", "get"]).is_err());
}

#[test]
fn list_flags_parse() {
    let cli = CommandLine::try_parse_from(["pm-config", "list", "-l", "--json"]).expect("parses");
    let Commands::List(list) = cli.command else {
        panic!("expected list");
    };
    assert!(list.long);
    assert!(list.json);
}
