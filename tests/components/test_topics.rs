//! Tests for components/topics.rs

use fcm_notification_channel::{NotificationError, TopicTarget, Topics};

#[test]
fn test_single_topic_renders_as_path() {
    let topics = Topics::single("news");

    assert!(topics.has_only_one_topic());
    assert_eq!(topics.build().unwrap(), TopicTarget::To("/topics/news".to_string()));
}

#[test]
fn test_flat_condition() {
    let topics = Topics::new().topic("a").and_topic("b").or_topic("c");

    assert!(!topics.has_only_one_topic());
    assert_eq!(
        topics.build().unwrap(),
        TopicTarget::Condition("'a' in topics && 'b' in topics || 'c' in topics".to_string())
    );
}

#[test]
fn test_nested_condition() {
    let topics = Topics::new()
        .topic("TopicA")
        .and_topics(|t| t.topic("TopicB").or_topic("TopicC"))
        .or_topics(|t| t.topic("TopicD"));

    assert_eq!(
        topics.build().unwrap(),
        TopicTarget::Condition(
            "'TopicA' in topics && ('TopicB' in topics || 'TopicC' in topics) || ('TopicD' in topics)"
                .to_string()
        )
    );
}

#[test]
fn test_empty_nest_is_dropped() {
    let topics = Topics::new().topic("solo").and_topics(|t| t);

    assert!(topics.has_only_one_topic());
    assert_eq!(topics.build().unwrap(), TopicTarget::To("/topics/solo".to_string()));
}

#[test]
fn test_no_topic_provided() {
    let topics = Topics::new();

    assert!(topics.is_empty());
    assert_eq!(topics.build().unwrap_err(), NotificationError::NoTopicProvided);
    assert_eq!(
        NotificationError::NoTopicProvided.to_string(),
        "At least one topic must be provided"
    );
}

#[test]
fn test_invalid_topic_name() {
    let error = Topics::new().topic("ok").or_topic("not ok").build().unwrap_err();

    assert_eq!(
        error,
        NotificationError::InvalidTopicName {
            name: "not ok".to_string()
        }
    );
    assert!(Topics::single("with-dash_under.tilde~percent%").build().is_ok());
}
