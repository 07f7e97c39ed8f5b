// Provider configuration: credentials, endpoint and request timeout

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{NotificationError, NotificationResult};

pub const DEFAULT_SEND_URL: &str = "https://fcm.googleapis.com/fcm/send";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for [`crate::backends::http::HttpSender`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FcmConfig {
    /// Server key, sent as `Authorization: key=<server_key>`
    pub server_key: String,
    pub sender_id: String,
    pub server_send_url: Url,
    #[serde(rename = "timeout_secs", with = "duration_secs")]
    pub timeout: Duration,
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            server_key: String::new(),
            sender_id: String::new(),
            server_send_url: default_send_url(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl FcmConfig {
    pub fn new(server_key: impl Into<String>, sender_id: impl Into<String>) -> Self {
        Self {
            server_key: server_key.into(),
            sender_id: sender_id.into(),
            ..Self::default()
        }
    }

    pub fn with_send_url(mut self, url: Url) -> Self {
        self.server_send_url = url;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Load from `FCM_SERVER_KEY` (required), `FCM_SENDER_ID`, `FCM_SEND_URL` and `FCM_TIMEOUT` (seconds)
    pub fn from_env() -> NotificationResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`FcmConfig::from_env`] with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> NotificationResult<Self> {
        let server_key = lookup("FCM_SERVER_KEY")
            .filter(|key| !key.is_empty())
            .ok_or_else(|| NotificationError::Config {
                key: "FCM_SERVER_KEY".to_string(),
                message: "server key is required".to_string(),
            })?;

        let mut config = Self::new(server_key, lookup("FCM_SENDER_ID").unwrap_or_default());

        if let Some(raw) = lookup("FCM_SEND_URL") {
            config.server_send_url = Url::parse(&raw).map_err(|e| NotificationError::Config {
                key: "FCM_SEND_URL".to_string(),
                message: e.to_string(),
            })?;
        }

        if let Some(raw) = lookup("FCM_TIMEOUT") {
            let secs = raw.trim().parse::<u64>().map_err(|e| NotificationError::Config {
                key: "FCM_TIMEOUT".to_string(),
                message: e.to_string(),
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn default_send_url() -> Url {
    Url::parse(DEFAULT_SEND_URL).expect("default send url must parse")
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}
