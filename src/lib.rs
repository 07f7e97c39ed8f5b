//! Firebase Cloud Messaging channel for application notification dispatch
//!
//! A notification materializes an [`FcmMessage`] for the entity it is sent to;
//! [`FcmChannel`] fills in the recipient from the entity's routing when the
//! message has none, picks the provider operation from the message kind
//! (direct, topic or device group), sends it and raises [`MessageWasSent`].
//!
//! ```rust,ignore
//! use fcm_notification_channel::*;
//!
//! struct User { tokens: Vec<String> }
//!
//! impl Notifiable for User {
//!     fn route_notification_for(&self, _channel: &str) -> Option<Recipient> {
//!         Some(Recipient::Tokens(self.tokens.clone()))
//!     }
//! }
//!
//! struct OrderShipped;
//!
//! impl ToFcmMessage<User> for OrderShipped {
//!     fn to_fcm(&self, _user: &User) -> NotificationResult<FcmMessage> {
//!         let mut message = FcmMessage::new();
//!         message.set_title("Order shipped").set_body("Your parcel is on its way");
//!         Ok(message)
//!     }
//! }
//!
//! let channel = FcmChannel::new(SenderFactory::from_env()?);
//! let response = channel.send(&user, &OrderShipped).await?;
//! ```

pub mod backends;
pub mod components;

use std::sync::Arc;

// Re-export all components for convenience
pub use backends::*;
pub use components::*;

/// Key the channel is registered under and the routing key it asks notifiables for
pub const CHANNEL_NAME: &str = "fcm";

/// Entity that can receive notifications
pub trait Notifiable {
    /// Recipient for `channel`
    ///
    /// `None` means the entity has no route; `Some(Recipient::Tokens(vec![]))`
    /// means it has a route with nobody on it, and the send is skipped.
    fn route_notification_for(&self, channel: &str) -> Option<Recipient>;
}

impl<T: Notifiable + ?Sized> Notifiable for Arc<T> {
    fn route_notification_for(&self, channel: &str) -> Option<Recipient> {
        (**self).route_notification_for(channel)
    }
}

/// Notification that can be delivered through the FCM channel
pub trait ToFcmMessage<N: ?Sized> {
    fn to_fcm(&self, notifiable: &N) -> NotificationResult<FcmMessage>;
}

/// Failure of [`FcmChannel::send`]
#[derive(Debug, thiserror::Error)]
pub enum ChannelError<E> {
    /// Message building or recipient resolution failed; nothing was sent
    #[error(transparent)]
    Notification(#[from] NotificationError),
    /// The provider client failed; its error is passed through as is
    #[error(transparent)]
    Transport(E),
}

impl<E> ChannelError<E> {
    pub fn as_transport(&self) -> Option<&E> {
        match self {
            ChannelError::Transport(error) => Some(error),
            ChannelError::Notification(_) => None,
        }
    }

    pub fn into_transport(self) -> Option<E> {
        match self {
            ChannelError::Transport(error) => Some(error),
            ChannelError::Notification(_) => None,
        }
    }
}

/// Delivers notifications through an [`FcmSender`]
pub struct FcmChannel<S, D = NoopDispatcher> {
    sender: S,
    events: D,
}

impl<S: FcmSender> FcmChannel<S> {
    /// Channel that raises no completion events
    pub fn new(sender: S) -> Self {
        Self {
            sender,
            events: NoopDispatcher,
        }
    }
}

impl FcmChannel<HttpSender> {
    /// Channel over the HTTP provider client
    pub fn from_config(config: FcmConfig) -> Result<Self, TransportError> {
        Ok(Self::new(SenderFactory::create(config)?))
    }
}

impl<S: FcmSender, D> FcmChannel<S, D> {
    pub fn with_events(sender: S, events: D) -> Self {
        Self { sender, events }
    }

    pub fn name(&self) -> &'static str {
        CHANNEL_NAME
    }

    pub fn sender(&self) -> &S {
        &self.sender
    }

    pub fn events(&self) -> &D {
        &self.events
    }

    /// Send `notification` to `notifiable`
    ///
    /// Returns `Ok(None)` without calling the provider when the notifiable routes
    /// to an empty token list. Provider errors come back as
    /// [`ChannelError::Transport`]; no event is raised for a failed send.
    pub async fn send<N, T>(
        &self,
        notifiable: &N,
        notification: &T,
    ) -> Result<Option<S::Response>, ChannelError<S::Error>>
    where
        N: Notifiable + Clone,
        T: ToFcmMessage<N> + ?Sized,
        D: EventDispatcher<MessageWasSent<N, S::Response>>,
    {
        let mut message = notification.to_fcm(notifiable)?;

        if message.recipient_not_given() {
            match notifiable.route_notification_for(CHANNEL_NAME) {
                Some(Recipient::Tokens(tokens)) if tokens.is_empty() => {
                    tracing::info!(channel = CHANNEL_NAME, "Notifiable routes to no tokens; nothing sent");
                    return Ok(None);
                },
                Some(recipient) if !recipient.is_empty() => {
                    tracing::debug!(recipient = recipient.type_name(), "Recipient resolved from routing");
                    message.to(recipient)?;
                },
                _ => return Err(NotificationError::MissingRecipient.into()),
            }
        }

        let kind = message.kind();
        let MessageArgs {
            recipient,
            options,
            notification,
            data,
        } = message.into_args();
        let recipient = recipient.ok_or(NotificationError::MissingRecipient)?;

        tracing::debug!(kind = kind.name(), "Dispatching message to provider");
        let response = self
            .sender
            .send_kind(kind, recipient, options, notification, data)
            .await
            .map_err(ChannelError::Transport)?;

        self.events
            .dispatch(MessageWasSent::new(response.clone(), notifiable.clone()));

        Ok(Some(response))
    }
}
