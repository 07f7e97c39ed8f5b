// Provider responses for direct, topic and group sends

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// Per-token errors meaning the token must be dropped
const DELETE_ERRORS: &[&str] = &["NotRegistered", "InvalidRegistration"];
/// Errors meaning the same send may succeed later
const RETRY_ERRORS: &[&str] = &["Unavailable", "InternalServerError"];
const MISSING_REGISTRATION: &str = "MissingRegistration";

#[derive(Debug, Deserialize)]
struct RawDownstream {
    #[serde(default)]
    multicast_id: Option<i64>,
    #[serde(default)]
    success: u32,
    #[serde(default)]
    failure: u32,
    #[serde(default)]
    canonical_ids: u32,
    #[serde(default)]
    results: Vec<RawResult>,
}

#[derive(Debug, Deserialize)]
struct RawResult {
    #[serde(default)]
    message_id: Option<Value>,
    #[serde(default)]
    registration_id: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Outcome of a send to one or more registration tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownstreamResponse {
    pub multicast_id: Option<i64>,
    pub success: u32,
    pub failure: u32,
    pub canonical_ids: u32,
    /// Tokens the provider no longer knows; remove them from storage
    pub tokens_to_delete: Vec<String>,
    /// Old token to canonical token
    pub tokens_to_modify: HashMap<String, String>,
    pub tokens_to_retry: Vec<String>,
    /// Token to provider error code
    pub tokens_with_error: HashMap<String, String>,
    pub has_missing_token: bool,
}

impl DownstreamResponse {
    /// Parse a provider body; `tokens` are the tokens of the request, in request order
    pub fn from_json(body: &str, tokens: &[String]) -> Result<Self, serde_json::Error> {
        let raw: RawDownstream = serde_json::from_str(body)?;
        let mut response = Self {
            multicast_id: raw.multicast_id,
            success: raw.success,
            failure: raw.failure,
            canonical_ids: raw.canonical_ids,
            ..Self::default()
        };

        for (index, result) in raw.results.into_iter().enumerate() {
            let token = tokens.get(index).cloned();
            match (result.error, token) {
                (Some(error), _) if error == MISSING_REGISTRATION => {
                    response.has_missing_token = true;
                },
                (Some(error), Some(token)) if DELETE_ERRORS.contains(&error.as_str()) => {
                    response.tokens_to_delete.push(token);
                },
                (Some(error), Some(token)) if RETRY_ERRORS.contains(&error.as_str()) => {
                    response.tokens_to_retry.push(token);
                },
                (Some(error), Some(token)) => {
                    response.tokens_with_error.insert(token, error);
                },
                (None, Some(token)) => {
                    if let (Some(_), Some(canonical)) = (result.message_id, result.registration_id) {
                        response.tokens_to_modify.insert(token, canonical);
                    }
                },
                (_, None) => {
                    tracing::debug!(index, "Provider result without a matching token");
                },
            }
        }

        Ok(response)
    }

    /// Fold the response of another chunk into this one
    pub fn merge(&mut self, other: DownstreamResponse) {
        if self.multicast_id.is_none() {
            self.multicast_id = other.multicast_id;
        }
        self.success += other.success;
        self.failure += other.failure;
        self.canonical_ids += other.canonical_ids;
        self.tokens_to_delete.extend(other.tokens_to_delete);
        self.tokens_to_modify.extend(other.tokens_to_modify);
        self.tokens_to_retry.extend(other.tokens_to_retry);
        self.tokens_with_error.extend(other.tokens_with_error);
        self.has_missing_token |= other.has_missing_token;
    }
}

/// Outcome of a topic send
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicResponse {
    pub message_id: Option<String>,
    pub error: Option<String>,
}

impl TopicResponse {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(default)]
            message_id: Option<Value>,
            #[serde(default)]
            error: Option<String>,
        }

        let raw: Raw = serde_json::from_str(body)?;
        Ok(Self {
            message_id: raw.message_id.map(|id| match id {
                Value::String(s) => s,
                other => other.to_string(),
            }),
            error: raw.error,
        })
    }

    pub fn is_success(&self) -> bool {
        self.message_id.is_some()
    }

    pub fn should_retry(&self) -> bool {
        self.error
            .as_deref()
            .is_some_and(|error| RETRY_ERRORS.contains(&error))
    }
}

/// Outcome of a device-group send
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GroupResponse {
    #[serde(default)]
    pub success: u32,
    #[serde(default)]
    pub failure: u32,
    #[serde(default, rename = "failed_registration_ids")]
    pub tokens_failed: Vec<String>,
}

impl GroupResponse {
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

/// Response of [`crate::backends::http::HttpSender`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FcmResponse {
    Downstream(DownstreamResponse),
    Topic(TopicResponse),
    Group(GroupResponse),
}

impl FcmResponse {
    pub fn as_downstream(&self) -> Option<&DownstreamResponse> {
        match self {
            FcmResponse::Downstream(response) => Some(response),
            _ => None,
        }
    }
}
