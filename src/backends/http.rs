// HTTP provider client - posts messages to the FCM send endpoint
// Direct sends above the provider's token limit are split into sequential chunks

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, RETRY_AFTER};
use serde_json::{Map, Value};

use super::response::{DownstreamResponse, FcmResponse, GroupResponse, TopicResponse};
use crate::components::{
    BoxFuture, FcmConfig, FcmSender, NotificationError, Options, PayloadData, PayloadNotification,
    Recipient, TopicTarget,
};

/// Most registration tokens the provider accepts in one request
pub const MAX_TOKENS_PER_REQUEST: usize = 1000;

/// Transport failures of [`HttpSender`]
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Provider rejected the request with status {status}: {body}")]
    InvalidRequest { status: u16, body: String },
    #[error("Provider rejected the server key")]
    Unauthorized,
    #[error("Provider server error {status} (retry after {retry_after:?} seconds)")]
    Server {
        status: u16,
        retry_after: Option<u64>,
    },
    #[error("Could not decode provider response: {0}")]
    Decode(#[from] serde_json::Error),
    /// Sender settings could not be loaded
    #[error("Invalid sender configuration: {0}")]
    Config(NotificationError),
    /// Message could not be addressed (wrong recipient shape, bad topic expression)
    #[error(transparent)]
    Message(#[from] NotificationError),
}

/// Addressing part of a request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestTarget {
    To(String),
    RegistrationIds(Vec<String>),
    Condition(String),
}

impl From<TopicTarget> for RequestTarget {
    fn from(target: TopicTarget) -> Self {
        match target {
            TopicTarget::To(to) => RequestTarget::To(to),
            TopicTarget::Condition(condition) => RequestTarget::Condition(condition),
        }
    }
}

/// [`FcmSender`] over the provider's HTTP endpoint
#[derive(Debug, Clone)]
pub struct HttpSender {
    client: reqwest::Client,
    config: FcmConfig,
}

impl HttpSender {
    pub fn new(config: FcmConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("fcm-notification-channel/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(config, client))
    }

    /// Use a preconfigured client (proxies, custom TLS)
    pub fn with_client(config: FcmConfig, client: reqwest::Client) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &FcmConfig {
        &self.config
    }

    /// JSON body of one request
    pub fn request_body(
        target: RequestTarget,
        options: Option<&Options>,
        notification: Option<&PayloadNotification>,
        data: Option<&PayloadData>,
    ) -> Value {
        let mut body = Map::new();
        match target {
            RequestTarget::To(to) => body.insert("to".to_string(), Value::from(to)),
            RequestTarget::RegistrationIds(ids) => {
                body.insert("registration_ids".to_string(), Value::from(ids))
            },
            RequestTarget::Condition(condition) => {
                body.insert("condition".to_string(), Value::from(condition))
            },
        };
        if let Some(options) = options {
            body.extend(options.to_map());
        }
        if let Some(notification) = notification {
            body.insert("notification".to_string(), Value::Object(notification.to_map()));
        }
        if let Some(data) = data.filter(|data| !data.is_empty()) {
            body.insert("data".to_string(), Value::Object(data.to_map()));
        }
        Value::Object(body)
    }

    async fn post(&self, body: &Value) -> Result<String, TransportError> {
        tracing::debug!(url = %self.config.server_send_url, "Posting message to provider");

        let response = self
            .client
            .post(self.config.server_send_url.clone())
            .header(AUTHORIZATION, format!("key={}", self.config.server_key))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.text().await?);
        }

        tracing::warn!(status = %status, "Provider rejected message");
        if status == StatusCode::UNAUTHORIZED {
            return Err(TransportError::Unauthorized);
        }
        if status.is_server_error() {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.trim().parse::<u64>().ok());
            return Err(TransportError::Server {
                status: status.as_u16(),
                retry_after,
            });
        }
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!(status = %status, error = %e, "Failed to read provider error body");
                String::new()
            },
        };
        Err(TransportError::InvalidRequest {
            status: status.as_u16(),
            body,
        })
    }

    async fn send_downstream(
        &self,
        tokens: Vec<String>,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> Result<DownstreamResponse, TransportError> {
        let mut merged: Option<DownstreamResponse> = None;
        for chunk in tokens.chunks(MAX_TOKENS_PER_REQUEST) {
            let body = Self::request_body(
                RequestTarget::RegistrationIds(chunk.to_vec()),
                options.as_ref(),
                notification.as_ref(),
                data.as_ref(),
            );
            let response = DownstreamResponse::from_json(&self.post(&body).await?, chunk)?;
            match merged.as_mut() {
                Some(total) => total.merge(response),
                None => merged = Some(response),
            }
        }
        Ok(merged.unwrap_or_default())
    }

    async fn send_topic(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> Result<FcmResponse, TransportError> {
        let given = recipient.type_name();
        let Recipient::Topics(topics) = recipient else {
            return Err(NotificationError::invalid_argument(
                "send_to_topic",
                "instanceof Topics",
                given,
            )
            .into());
        };
        let body = Self::request_body(
            topics.build()?.into(),
            options.as_ref(),
            notification.as_ref(),
            data.as_ref(),
        );
        let response = TopicResponse::from_json(&self.post(&body).await?)?;
        Ok(FcmResponse::Topic(response))
    }
}

impl FcmSender for HttpSender {
    type Response = FcmResponse;
    type Error = TransportError;

    fn send_to(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>> {
        Box::pin(async move {
            match recipient {
                Recipient::Token(token) => {
                    let body = Self::request_body(
                        RequestTarget::To(token.clone()),
                        options.as_ref(),
                        notification.as_ref(),
                        data.as_ref(),
                    );
                    let raw = self.post(&body).await?;
                    Ok(FcmResponse::Downstream(DownstreamResponse::from_json(&raw, &[token])?))
                },
                Recipient::Tokens(tokens) => self
                    .send_downstream(tokens, options, notification, data)
                    .await
                    .map(FcmResponse::Downstream),
                topics @ Recipient::Topics(_) => {
                    self.send_topic(topics, options, notification, data).await
                },
            }
        })
    }

    fn send_to_topic(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>> {
        Box::pin(self.send_topic(recipient, options, notification, data))
    }

    fn send_to_group(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>> {
        Box::pin(async move {
            let given = recipient.type_name();
            let Recipient::Token(notification_key) = recipient else {
                return Err(NotificationError::invalid_argument(
                    "send_to_group",
                    "a notification key",
                    given,
                )
                .into());
            };
            let body = Self::request_body(
                RequestTarget::To(notification_key),
                options.as_ref(),
                notification.as_ref(),
                data.as_ref(),
            );
            let response = GroupResponse::from_json(&self.post(&body).await?)?;
            Ok(FcmResponse::Group(response))
        })
    }
}
