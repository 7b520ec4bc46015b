//! Loading raw mappings into layers while a listener watches the warnings.

use std::cell::RefCell;
use std::rc::Rc;

use layered_config::{ConfigData, Location, LogChannel, Warning};
use rstest::rstest;
use serde_json::{Map, json};
use test_helpers::object;

type Record = (String, &'static str, String);

fn record(warning: &Warning) -> Record {
    (
        warning.level().to_string(),
        Warning::SUBSYSTEM,
        warning.message(),
    )
}

fn watch(channel: &LogChannel) -> (Rc<RefCell<Vec<Record>>>, layered_config::Subscription) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let subscription = channel.subscribe(move |warning| sink.borrow_mut().push(record(warning)));
    (seen, subscription)
}

#[test]
fn invalid_cli_mapping_warns_once_per_entry() {
    let channel = LogChannel::new();
    let (seen, subscription) = watch(&channel);

    let mut config = ConfigData::new(Location::Cli);
    config.load(
        object(json!({
            "hash-algorithm": "notok",
            "unknown-algorithm": "huh",
            "access": "yes please",
        })),
        &mut &channel,
    );
    subscription.cancel();

    assert_eq!(config.data(), &Map::new());
    let expected: Vec<Record> = vec![
        (
            "warn".into(),
            "config",
            "invalid item `hash-algorithm` set with `notok`, not allowed to be set on config layer `cli`".into(),
        ),
        (
            "warn".into(),
            "config",
            "unknown item `unknown-algorithm` set with `huh`, not allowed to be set".into(),
        ),
        (
            "warn".into(),
            "config",
            r#"invalid item `access` set with `yes please`, Must be one of: "restricted", "public""#.into(),
        ),
    ];
    assert_eq!(*seen.borrow(), expected);
    assert_eq!(channel.listener_count(), 0);
}

#[test]
fn listeners_stop_receiving_after_their_subscription_drops() {
    let channel = LogChannel::new();
    let mut config = ConfigData::new(Location::User);
    {
        let (seen, _subscription) = watch(&channel);
        config.load(object(json!({"colour": "auto"})), &mut &channel);
        assert_eq!(seen.borrow().len(), 1);
    }
    assert_eq!(channel.listener_count(), 0);
    config.load(object(json!({"shade": "dark"})), &mut &channel);
}

#[rstest]
#[case(Location::Default)]
#[case(Location::Builtin)]
#[case(Location::Global)]
#[case(Location::User)]
#[case(Location::Project)]
fn hash_algorithm_is_accepted_on_file_layers(#[case] location: Location) {
    let mut warnings: Vec<Warning> = Vec::new();
    let mut config = ConfigData::new(location);
    config.load(object(json!({"hash-algorithm": "sha384"})), &mut warnings);
    assert!(warnings.is_empty());
    assert_eq!(config.get("hash-algorithm"), Some(&json!("sha384")));
}

#[rstest]
#[case(Location::Env)]
#[case(Location::Cli)]
fn hash_algorithm_is_rejected_on_invocation_layers(#[case] location: Location) {
    let mut warnings: Vec<Warning> = Vec::new();
    let mut config = ConfigData::new(location);
    config.load(object(json!({"hash-algorithm": "sha384"})), &mut warnings);
    assert!(config.is_empty());
    assert_eq!(
        warnings.iter().map(Warning::message).collect::<Vec<_>>(),
        vec![format!(
            "invalid item `hash-algorithm` set with `sha384`, not allowed to be set on config layer `{location}`"
        )]
    );
}

#[test]
fn layer_names_round_trip_through_parsing() {
    for location in Location::ALL {
        let config = ConfigData::for_layer(location.as_str()).expect("known layer");
        assert_eq!(config.location(), location);
    }
}
