//! Tests for components/options.rs

use fcm_notification_channel::{
    FcmMessage, NotificationError, Options, OptionsBuilder, OptionsPriority,
};
use serde_json::{Value, json};

fn full_builder() -> OptionsBuilder {
    OptionsBuilder::new()
        .with_collapse_key("collapseKey")
        .with_content_available(true)
        .with_priority(OptionsPriority::High)
        .with_delay_while_idle(true)
        .with_dry_run(true)
        .with_restricted_package_name("customPackageName")
        .with_time_to_live(200)
        .expect("200 seconds is a valid time to live")
}

#[test]
fn test_options_from_builder() {
    let mut message = FcmMessage::new();
    assert!(message.options().is_none());

    message.set_options(full_builder()).unwrap();

    let options = message.options().unwrap();
    assert_eq!(options.collapse_key(), Some("collapseKey"));
    assert_eq!(options.priority(), Some(OptionsPriority::High));
    assert_eq!(options.is_content_available(), Some(true));
    assert_eq!(options.is_delay_while_idle(), Some(true));
    assert_eq!(options.is_dry_run(), Some(true));
    assert_eq!(options.restricted_package_name(), Some("customPackageName"));
    assert_eq!(options.time_to_live(), Some(200));
}

#[test]
fn test_options_from_instance_is_stored_as_is() {
    let mut message = FcmMessage::new();
    let options = OptionsBuilder::new().with_collapse_key("k").build();

    message.set_options(options.clone()).unwrap();

    assert_eq!(message.options(), Some(&options));
    assert_eq!(message.priority(), None);
}

#[test]
fn test_options_from_map() {
    let mut message = FcmMessage::new();

    message
        .set_options(json!({
            "collapse_key": "collapseKey",
            "content_available": true,
            "priority": "high",
            "delay_while_idle": true,
            "dry_run": true,
            "restricted_package_name": "customPackageName",
            "time_to_live": 200,
        }))
        .unwrap();

    assert_eq!(message.options(), Some(&full_builder().build()));
}

#[test]
fn test_options_map_without_priority_defaults_to_normal() {
    let mut message = FcmMessage::new();

    message.set_options(json!({ "dry_run": true })).unwrap();

    assert_eq!(message.priority(), Some(OptionsPriority::Normal));
    assert_eq!(message.is_dry_run(), Some(true));
}

#[test]
fn test_options_map_merges_over_existing_values() {
    let mut message = FcmMessage::new();
    message
        .set_options(json!({ "collapse_key": "first", "time_to_live": 60, "priority": "high" }))
        .unwrap();

    message
        .set_options(json!({ "dry_run": true, "collapse_key": "second" }))
        .unwrap();

    assert_eq!(message.collapse_key(), Some("second"));
    assert_eq!(message.time_to_live(), Some(60));
    assert_eq!(message.priority(), Some(OptionsPriority::High));
    assert_eq!(message.is_dry_run(), Some(true));
}

#[test]
fn test_options_null_leaves_current_value() {
    let mut message = FcmMessage::new();
    message.set_options(json!({ "collapse_key": "kept" })).unwrap();

    message.set_options(Value::Null).unwrap();

    assert_eq!(message.collapse_key(), Some("kept"));
}

#[test]
fn test_options_rejects_unsupported_input() {
    let error = FcmMessage::new().set_options(json!("foo")).unwrap_err();

    assert_eq!(
        error.to_string(),
        "The argument for FcmMessage::set_options must be instanceof Options, OptionsBuilder, null or map. string given."
    );
    assert!(matches!(error, NotificationError::InvalidArgument { .. }));
}

#[test]
fn test_options_rejects_invalid_field_values() {
    let priority = FcmMessage::new()
        .set_options(json!({ "priority": "urgent" }))
        .unwrap_err();
    assert!(matches!(
        priority,
        NotificationError::InvalidFieldValue { field: "priority", .. }
    ));

    let dry_run = FcmMessage::new()
        .set_options(json!({ "dry_run": "yes" }))
        .unwrap_err();
    assert_eq!(
        dry_run,
        NotificationError::InvalidFieldValue {
            group: "options",
            field: "dry_run",
            expected: "boolean",
            given: "string".to_string(),
        }
    );
}

#[test]
fn test_time_to_live_limit() {
    assert!(OptionsBuilder::new().with_time_to_live(2_419_200).is_ok());
    assert!(OptionsBuilder::new().with_time_to_live(2_419_201).is_err());

    let error = FcmMessage::new()
        .set_options(json!({ "time_to_live": 2_419_201 }))
        .unwrap_err();
    assert!(matches!(
        error,
        NotificationError::InvalidFieldValue { field: "time_to_live", .. }
    ));
}

#[test]
fn test_options_to_map_skips_unset_fields() {
    let options = Options::builder()
        .with_priority(OptionsPriority::High)
        .with_dry_run(false)
        .build();

    let map = options.to_map();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("priority"), Some(&json!("high")));
    assert_eq!(map.get("dry_run"), Some(&json!(false)));
}

#[test]
fn test_priority_parsing() {
    assert_eq!("normal".parse::<OptionsPriority>().unwrap(), OptionsPriority::Normal);
    assert_eq!("high".parse::<OptionsPriority>().unwrap(), OptionsPriority::High);
    assert!("HIGH".parse::<OptionsPriority>().is_err());
    assert_eq!(OptionsPriority::default(), OptionsPriority::Normal);
    assert_eq!(OptionsPriority::High.to_string(), "high");
}

#[test]
fn test_options_deserialize_through_builder_checks() {
    let options: Options =
        serde_json::from_value(json!({ "priority": "high", "time_to_live": 200 })).unwrap();
    assert_eq!(options.priority(), Some(OptionsPriority::High));
    assert_eq!(options.time_to_live(), Some(200));

    let too_long = serde_json::from_value::<Options>(json!({ "time_to_live": 9_999_999 }));
    assert!(too_long.is_err());

    let bad_priority = serde_json::from_value::<Options>(json!({ "priority": "urgent" }));
    assert!(bad_priority.is_err());
}

#[test]
fn test_options_serialize_to_provider_keys() {
    let options = OptionsBuilder::new().with_dry_run(true).build();

    assert_eq!(serde_json::to_value(&options).unwrap(), json!({ "dry_run": true }));
}
