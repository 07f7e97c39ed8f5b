// Provider backends - concrete FcmSender implementations

pub mod http;
pub mod response;

pub use http::{HttpSender, MAX_TOKENS_PER_REQUEST, RequestTarget, TransportError};
pub use response::{DownstreamResponse, FcmResponse, GroupResponse, TopicResponse};

use crate::components::FcmConfig;

/// Factory for creating provider clients
pub struct SenderFactory;

impl SenderFactory {
    /// Create an HTTP sender for the given configuration
    pub fn create(config: FcmConfig) -> Result<HttpSender, TransportError> {
        HttpSender::new(config)
    }

    /// Create an HTTP sender configured from `FCM_*` environment variables
    pub fn from_env() -> Result<HttpSender, TransportError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`SenderFactory::from_env`] with a custom variable source
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<HttpSender, TransportError> {
        let config = FcmConfig::from_lookup(lookup).map_err(TransportError::Config)?;
        HttpSender::new(config)
    }
}
