// Provider client abstraction: the three send operations the channel dispatches to

use std::future::Future;
use std::pin::Pin;

use super::{MessageKind, Options, PayloadData, PayloadNotification, Recipient};

/// Boxed future returned by [`FcmSender`] operations
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Push provider client
///
/// Each operation performs exactly one logical send and reports transport
/// failures through `Self::Error`; the channel never wraps or retries them.
pub trait FcmSender: Send + Sync {
    /// Provider response handed back to the caller and to the completion event
    type Response: Clone + Send + Sync + 'static;
    /// Transport error, surfaced to the caller unchanged
    type Error: std::error::Error + Send + Sync + 'static;

    /// Send to one registration token or a token list
    fn send_to(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>>;

    /// Send to a topic expression
    fn send_to_topic(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>>;

    /// Send to a device-group notification key
    fn send_to_group(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>>;

    /// Pick the operation matching `kind`
    fn send_kind(
        &self,
        kind: MessageKind,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>> {
        match kind {
            MessageKind::Direct => self.send_to(recipient, options, notification, data),
            MessageKind::Topic => self.send_to_topic(recipient, options, notification, data),
            MessageKind::Group => self.send_to_group(recipient, options, notification, data),
        }
    }
}

impl<S: FcmSender + ?Sized> FcmSender for std::sync::Arc<S> {
    type Response = S::Response;
    type Error = S::Error;

    fn send_to(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>> {
        (**self).send_to(recipient, options, notification, data)
    }

    fn send_to_topic(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>> {
        (**self).send_to_topic(recipient, options, notification, data)
    }

    fn send_to_group(
        &self,
        recipient: Recipient,
        options: Option<Options>,
        notification: Option<PayloadNotification>,
        data: Option<PayloadData>,
    ) -> BoxFuture<'_, Result<Self::Response, Self::Error>> {
        (**self).send_to_group(recipient, options, notification, data)
    }
}
