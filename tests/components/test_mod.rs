//! Tests for components/mod.rs

use fcm_notification_channel::components::{FieldGroup, json_type_name};
use fcm_notification_channel::{NotificationError, Options, OptionsBuilder, Recipient, Topics};
use serde_json::{Map, json};

type OptionsGroup = FieldGroup<Options, OptionsBuilder>;

#[test]
fn test_recipient_emptiness() {
    assert!(Recipient::from("").is_empty());
    assert!(Recipient::Tokens(vec![]).is_empty());
    assert!(Recipient::Topics(Topics::new()).is_empty());

    assert!(!Recipient::from("token").is_empty());
    assert!(!Recipient::from(vec!["a"]).is_empty());
    assert!(!Recipient::from(Topics::single("news")).is_empty());
}

#[test]
fn test_recipient_type_names() {
    assert_eq!(Recipient::from("t".to_string()).type_name(), "token");
    assert_eq!(Recipient::from(vec!["t".to_string()]).type_name(), "token list");
    assert_eq!(Recipient::from(Topics::single("x")).type_name(), "Topics");
}

#[test]
fn test_field_group_from_json_values() {
    assert!(matches!(OptionsGroup::from(json!(null)), FieldGroup::Empty));
    assert!(matches!(OptionsGroup::from(None::<serde_json::Value>), FieldGroup::Empty));
    assert!(matches!(OptionsGroup::from(json!({ "dry_run": true })), FieldGroup::Raw(map) if map.len() == 1));
    assert!(matches!(OptionsGroup::from(Map::new()), FieldGroup::Raw(map) if map.is_empty()));
    assert!(matches!(OptionsGroup::from(json!("x")), FieldGroup::Unsupported(_)));
    assert!(matches!(OptionsGroup::from(Options::default()), FieldGroup::Built(_)));
    assert!(matches!(OptionsGroup::from(OptionsBuilder::new()), FieldGroup::Builder(_)));
}

#[test]
fn test_json_type_names() {
    assert_eq!(json_type_name(&json!(null)), "null");
    assert_eq!(json_type_name(&json!(false)), "boolean");
    assert_eq!(json_type_name(&json!(1)), "integer");
    assert_eq!(json_type_name(&json!(1.5)), "double");
    assert_eq!(json_type_name(&json!("s")), "string");
    assert_eq!(json_type_name(&json!([1])), "array");
    assert_eq!(json_type_name(&json!({})), "map");
}

#[test]
fn test_missing_recipient_message() {
    assert_eq!(
        NotificationError::MissingRecipient.to_string(),
        "Notification was not sent. You should specify device token(s), topic(s) or group(s) for sending notification."
    );
}

#[test]
fn test_invalid_field_value_message() {
    let error = NotificationError::InvalidFieldValue {
        group: "options",
        field: "dry_run",
        expected: "boolean",
        given: "string".to_string(),
    };

    assert_eq!(
        error.to_string(),
        "Invalid value for options.dry_run: expected boolean, string given."
    );
}
