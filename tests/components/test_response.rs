//! Tests for backends/response.rs

use fcm_notification_channel::{DownstreamResponse, FcmResponse, GroupResponse, TopicResponse};

fn tokens(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[test]
fn test_downstream_classifies_results() {
    let body = r#"{
        "multicast_id": 216,
        "success": 2,
        "failure": 4,
        "canonical_ids": 1,
        "results": [
            { "message_id": "1:0408" },
            { "error": "Unavailable" },
            { "error": "InvalidRegistration" },
            { "message_id": "1:1516", "registration_id": "canonical" },
            { "error": "NotRegistered" },
            { "error": "MismatchSenderId" }
        ]
    }"#;
    let request = tokens(&["ok", "retry", "invalid", "old", "gone", "mismatch"]);

    let response = DownstreamResponse::from_json(body, &request).unwrap();

    assert_eq!(response.multicast_id, Some(216));
    assert_eq!(response.success, 2);
    assert_eq!(response.failure, 4);
    assert_eq!(response.canonical_ids, 1);
    assert_eq!(response.tokens_to_retry, tokens(&["retry"]));
    assert_eq!(response.tokens_to_delete, tokens(&["invalid", "gone"]));
    assert_eq!(response.tokens_to_modify.get("old").map(String::as_str), Some("canonical"));
    assert_eq!(
        response.tokens_with_error.get("mismatch").map(String::as_str),
        Some("MismatchSenderId")
    );
    assert!(!response.has_missing_token);
}

#[test]
fn test_downstream_missing_registration() {
    let body = r#"{ "success": 0, "failure": 1, "results": [ { "error": "MissingRegistration" } ] }"#;

    let response = DownstreamResponse::from_json(body, &[]).unwrap();

    assert!(response.has_missing_token);
    assert!(response.tokens_with_error.is_empty());
}

#[test]
fn test_downstream_merge() {
    let mut first = DownstreamResponse::from_json(
        r#"{ "multicast_id": 1, "success": 1, "failure": 1, "results": [ {"message_id": "a"}, {"error": "NotRegistered"} ] }"#,
        &tokens(&["t1", "t2"]),
    )
    .unwrap();
    let second = DownstreamResponse::from_json(
        r#"{ "multicast_id": 2, "success": 0, "failure": 1, "results": [ {"error": "Unavailable"} ] }"#,
        &tokens(&["t3"]),
    )
    .unwrap();

    first.merge(second);

    assert_eq!(first.multicast_id, Some(1));
    assert_eq!(first.success, 1);
    assert_eq!(first.failure, 2);
    assert_eq!(first.tokens_to_delete, tokens(&["t2"]));
    assert_eq!(first.tokens_to_retry, tokens(&["t3"]));
}

#[test]
fn test_downstream_rejects_malformed_body() {
    assert!(DownstreamResponse::from_json("<html>", &[]).is_err());
}

#[test]
fn test_topic_response() {
    let success = TopicResponse::from_json(r#"{ "message_id": 5000 }"#).unwrap();
    assert!(success.is_success());
    assert_eq!(success.message_id.as_deref(), Some("5000"));
    assert!(!success.should_retry());

    let retry = TopicResponse::from_json(r#"{ "error": "InternalServerError" }"#).unwrap();
    assert!(!retry.is_success());
    assert!(retry.should_retry());

    let failed = TopicResponse::from_json(r#"{ "error": "TopicsMessageRateExceeded" }"#).unwrap();
    assert!(!failed.should_retry());
}

#[test]
fn test_group_response() {
    let response = GroupResponse::from_json(
        r#"{ "success": 1, "failure": 2, "failed_registration_ids": ["x", "y"] }"#,
    )
    .unwrap();

    assert_eq!(response.success, 1);
    assert_eq!(response.failure, 2);
    assert_eq!(response.tokens_failed, tokens(&["x", "y"]));

    let wrapped = FcmResponse::Group(response);
    assert!(wrapped.as_downstream().is_none());
    assert!(FcmResponse::Downstream(DownstreamResponse::default()).as_downstream().is_some());
}
