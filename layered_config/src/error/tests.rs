//! Unit tests for error rendering and classification.

use std::path::Path;

use rstest::rstest;

use super::ConfigError;
use crate::Location;

#[rstest]
#[case(ConfigError::InvalidLocation { name: "disk".into() }, "invalid config location `disk`")]
#[case(ConfigError::unknown_key("colour"), "unknown configuration key `colour`")]
#[case(
    ConfigError::UnrankedLocation { location: Location::Builtin },
    "location `builtin` has no rank in the precedence table"
)]
#[case(
    ConfigError::DuplicateLayer { location: Location::Cli },
    "a layer for location `cli` is already present"
)]
#[case(
    ConfigError::ForeignRegistry { location: Location::User },
    "layer `user` was validated against a different registry"
)]
fn renders_messages(#[case] err: ConfigError, #[case] expected: &str) {
    assert_eq!(err.to_string(), expected);
}

#[test]
fn file_errors_keep_path_and_source() {
    let err = ConfigError::invalid_data(Path::new("/tmp/.pmrc.toml"), "root must be a table");
    let ConfigError::File { path, source } = &err else {
        panic!("expected file error, got {err:?}");
    };
    assert_eq!(path, Path::new("/tmp/.pmrc.toml"));
    assert_eq!(source.to_string(), "root must be a table");
    assert!(err.to_string().starts_with("configuration file error in '/tmp/.pmrc.toml'"));
}

#[test]
fn classifies_unknown_keys() {
    assert!(ConfigError::unknown_key("nope").is_unknown_key());
    assert!(!ConfigError::DuplicateLocation { location: Location::Env }.is_unknown_key());
}
