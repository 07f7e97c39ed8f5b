//! Tests for components/config.rs

use std::collections::HashMap;
use std::time::Duration;

use fcm_notification_channel::{FcmConfig, NotificationError};
use fcm_notification_channel::components::config::{DEFAULT_SEND_URL, DEFAULT_TIMEOUT_SECS};

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_defaults() {
    let config = FcmConfig::new("server-key", "sender");

    assert_eq!(config.server_key, "server-key");
    assert_eq!(config.sender_id, "sender");
    assert_eq!(config.server_send_url.as_str(), DEFAULT_SEND_URL);
    assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
}

#[test]
fn test_builder_overrides() {
    let url = url::Url::parse("http://localhost:8080/send").unwrap();
    let config = FcmConfig::new("key", "")
        .with_send_url(url.clone())
        .with_timeout(Duration::from_secs(5));

    assert_eq!(config.server_send_url, url);
    assert_eq!(config.timeout, Duration::from_secs(5));
}

#[test]
fn test_from_lookup() -> anyhow::Result<()> {
    let config = FcmConfig::from_lookup(lookup(&[
        ("FCM_SERVER_KEY", "abc"),
        ("FCM_SENDER_ID", "123"),
        ("FCM_SEND_URL", "http://127.0.0.1:9000/fcm/send"),
        ("FCM_TIMEOUT", " 12 "),
    ]))?;

    assert_eq!(config.server_key, "abc");
    assert_eq!(config.sender_id, "123");
    assert_eq!(config.server_send_url.as_str(), "http://127.0.0.1:9000/fcm/send");
    assert_eq!(config.timeout, Duration::from_secs(12));
    Ok(())
}

#[test]
fn test_from_lookup_requires_server_key() {
    let missing = FcmConfig::from_lookup(|_: &str| None).unwrap_err();
    assert!(matches!(missing, NotificationError::Config { ref key, .. } if key == "FCM_SERVER_KEY"));

    let empty = FcmConfig::from_lookup(lookup(&[("FCM_SERVER_KEY", "")])).unwrap_err();
    assert_eq!(
        empty.to_string(),
        "Invalid configuration for FCM_SERVER_KEY: server key is required"
    );
}

#[test]
fn test_from_lookup_rejects_bad_values() {
    let error = FcmConfig::from_lookup(lookup(&[
        ("FCM_SERVER_KEY", "abc"),
        ("FCM_TIMEOUT", "soon"),
    ]))
    .unwrap_err();
    assert!(matches!(error, NotificationError::Config { ref key, .. } if key == "FCM_TIMEOUT"));

    let error = FcmConfig::from_lookup(lookup(&[
        ("FCM_SERVER_KEY", "abc"),
        ("FCM_SEND_URL", "not a url"),
    ]))
    .unwrap_err();
    assert!(matches!(error, NotificationError::Config { ref key, .. } if key == "FCM_SEND_URL"));
}

#[test]
fn test_serde_round_trip_with_defaults() {
    let config: FcmConfig =
        serde_json::from_str(r#"{ "server_key": "abc", "timeout_secs": 3 }"#).unwrap();

    assert_eq!(config.server_key, "abc");
    assert_eq!(config.sender_id, "");
    assert_eq!(config.server_send_url.as_str(), DEFAULT_SEND_URL);
    assert_eq!(config.timeout, Duration::from_secs(3));

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["timeout_secs"], 3);
    assert_eq!(json["server_send_url"], DEFAULT_SEND_URL);
}
