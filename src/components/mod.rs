// Message model for Firebase Cloud Messaging delivery
// Typed sub-objects (options, notification payload, data payload), recipients and the error surface

use serde_json::{Map, Value};

pub mod config;
pub mod events;
pub mod message;
pub mod options;
pub mod payload;
pub mod sender;
pub mod topics;

pub use config::FcmConfig;
pub use events::{Callback, EventDispatcher, EventLog, MessageWasSent, NoopDispatcher};
pub use message::{FcmMessage, MessageArgs, MessageKind};
pub use options::{Options, OptionsBuilder, OptionsPriority};
pub use payload::{PayloadData, PayloadDataBuilder, PayloadNotification, PayloadNotificationBuilder};
pub use sender::{BoxFuture, FcmSender};
pub use topics::{TopicTarget, Topics};

/// Message recipient as accepted by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    /// A single registration token, or a device-group notification key
    Token(String),
    /// A list of registration tokens
    Tokens(Vec<String>),
    /// A topic expression
    Topics(Topics),
}

impl Recipient {
    /// A recipient is empty when there is nothing to deliver to
    pub fn is_empty(&self) -> bool {
        match self {
            Recipient::Token(token) => token.is_empty(),
            Recipient::Tokens(tokens) => tokens.is_empty(),
            Recipient::Topics(topics) => topics.is_empty(),
        }
    }

    /// Human readable shape, used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Recipient::Token(_) => "token",
            Recipient::Tokens(_) => "token list",
            Recipient::Topics(_) => "Topics",
        }
    }
}

impl From<&str> for Recipient {
    fn from(token: &str) -> Self {
        Recipient::Token(token.to_string())
    }
}

impl From<String> for Recipient {
    fn from(token: String) -> Self {
        Recipient::Token(token)
    }
}

impl From<Vec<String>> for Recipient {
    fn from(tokens: Vec<String>) -> Self {
        Recipient::Tokens(tokens)
    }
}

impl From<Vec<&str>> for Recipient {
    fn from(tokens: Vec<&str>) -> Self {
        Recipient::Tokens(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<Topics> for Recipient {
    fn from(topics: Topics) -> Self {
        Recipient::Topics(topics)
    }
}

/// Input accepted by the field-group setters of [`FcmMessage`]
///
/// `T` is the built sub-object, `B` its builder. Raw mappings are translated
/// through the group's name table and merged over the current value.
#[derive(Debug, Clone)]
pub enum FieldGroup<T, B> {
    /// Leaves the current value untouched
    Empty,
    /// Stored as is
    Built(T),
    /// Finalized and stored
    Builder(B),
    /// Merged over the current value, then translated field by field
    Raw(Map<String, Value>),
    /// Anything else; always rejected
    Unsupported(Value),
}

impl<T, B> From<Value> for FieldGroup<T, B> {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => FieldGroup::Empty,
            Value::Object(map) => FieldGroup::Raw(map),
            other => FieldGroup::Unsupported(other),
        }
    }
}

impl<T, B> From<Map<String, Value>> for FieldGroup<T, B> {
    fn from(map: Map<String, Value>) -> Self {
        FieldGroup::Raw(map)
    }
}

impl<T, B> From<Option<Value>> for FieldGroup<T, B> {
    fn from(value: Option<Value>) -> Self {
        value.map_or(FieldGroup::Empty, FieldGroup::from)
    }
}

/// One row of a field-group translation table: raw key, typed reader, builder writer
pub(crate) struct FieldSpec<T, B> {
    pub key: &'static str,
    pub read: fn(&T) -> Option<Value>,
    pub write: fn(&mut B, &Value) -> NotificationResult<()>,
}

/// Serialize a typed sub-object through its table, skipping unset fields
pub(crate) fn table_to_map<T, B>(table: &[FieldSpec<T, B>], item: &T) -> Map<String, Value> {
    table
        .iter()
        .filter_map(|field| (field.read)(item).map(|value| (field.key.to_string(), value)))
        .collect()
}

/// Populate a builder from a raw mapping; keys outside the table are ignored, nulls leave the field unset
pub(crate) fn populate_builder<T, B>(
    table: &[FieldSpec<T, B>],
    builder: &mut B,
    raw: &Map<String, Value>,
) -> NotificationResult<()> {
    for field in table {
        match raw.get(field.key) {
            None | Some(Value::Null) => {},
            Some(value) => (field.write)(builder, value)?,
        }
    }
    Ok(())
}

pub(crate) fn bool_field(
    group: &'static str,
    field: &'static str,
    value: &Value,
) -> NotificationResult<bool> {
    value.as_bool().ok_or_else(|| NotificationError::InvalidFieldValue {
        group,
        field,
        expected: "boolean",
        given: json_type_name(value).to_string(),
    })
}

/// Strings are taken as is; numbers and booleans are rendered to their text form
pub(crate) fn string_field(
    group: &'static str,
    field: &'static str,
    value: &Value,
) -> NotificationResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(NotificationError::InvalidFieldValue {
            group,
            field,
            expected: "string",
            given: json_type_name(other).to_string(),
        }),
    }
}

pub(crate) fn u32_field(
    group: &'static str,
    field: &'static str,
    value: &Value,
) -> NotificationResult<u32> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| NotificationError::InvalidFieldValue {
            group,
            field,
            expected: "unsigned integer",
            given: json_type_name(value).to_string(),
        })
}

/// Type name of a JSON value as reported in argument errors
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "double",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "map",
    }
}

/// Error types for message building and dispatch
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NotificationError {
    /// A field-group setter or recipient setter received an unsupported value
    #[error("The argument for FcmMessage::{method} must be {expected}. {given} given.")]
    InvalidArgument {
        method: String,
        expected: String,
        given: String,
    },
    /// A raw mapping carried a value that cannot populate the typed field
    #[error("Invalid value for {group}.{field}: expected {expected}, {given} given.")]
    InvalidFieldValue {
        group: &'static str,
        field: &'static str,
        expected: &'static str,
        given: String,
    },
    /// Name-dispatched accessor that is not in any field table
    #[error("Method {method} does not exist.")]
    NoSuchMethod { method: String },
    /// Neither the message nor the notifiable's routing provided a recipient
    #[error(
        "Notification was not sent. You should specify device token(s), topic(s) or group(s) for sending notification."
    )]
    MissingRecipient,
    /// Topic expression without any topic
    #[error("At least one topic must be provided")]
    NoTopicProvided,
    /// Topic name outside the provider's allowed alphabet
    #[error("Topic name '{name}' is invalid")]
    InvalidTopicName { name: String },
    /// Configuration loading error
    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },
}

impl NotificationError {
    pub(crate) fn invalid_argument(
        method: impl Into<String>,
        expected: impl Into<String>,
        given: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            method: method.into(),
            expected: expected.into(),
            given: given.into(),
        }
    }

    pub(crate) fn no_such_method(method: &str) -> Self {
        Self::NoSuchMethod {
            method: method.to_string(),
        }
    }
}

/// Type alias for notification results with comprehensive error handling
pub type NotificationResult<T> = Result<T, NotificationError>;
