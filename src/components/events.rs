// Completion event and the dispatchers that can receive it

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc};

/// Raised once after the provider accepted a send
#[derive(Debug, Clone, PartialEq)]
pub struct MessageWasSent<N, R> {
    /// Provider response of the send
    pub response: R,
    /// Entity the notification was sent to
    pub notifiable: N,
}

impl<N, R> MessageWasSent<N, R> {
    pub fn new(response: R, notifiable: N) -> Self {
        Self {
            response,
            notifiable,
        }
    }
}

/// Fire-and-forget sink for events
pub trait EventDispatcher<E>: Send + Sync {
    fn dispatch(&self, event: E);
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDispatcher;

impl<E> EventDispatcher<E> for NoopDispatcher {
    fn dispatch(&self, _event: E) {}
}

/// Forwards events to a closure
#[derive(Debug, Clone, Copy)]
pub struct Callback<F>(pub F);

impl<E, F> EventDispatcher<E> for Callback<F>
where
    F: Fn(E) + Send + Sync,
{
    fn dispatch(&self, event: E) {
        (self.0)(event)
    }
}

impl<E: Send> EventDispatcher<E> for mpsc::UnboundedSender<E> {
    fn dispatch(&self, event: E) {
        if self.send(event).is_err() {
            tracing::debug!("Event receiver dropped; event discarded");
        }
    }
}

impl<E: Send> EventDispatcher<E> for broadcast::Sender<E> {
    fn dispatch(&self, event: E) {
        // Err only means there are no subscribers right now
        let _ = self.send(event);
    }
}

impl<E, D: EventDispatcher<E> + ?Sized> EventDispatcher<E> for Arc<D> {
    fn dispatch(&self, event: E) {
        (**self).dispatch(event)
    }
}

/// Keeps every event in memory, in dispatch order
#[derive(Debug)]
pub struct EventLog<E> {
    events: Mutex<Vec<E>>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

impl<E> EventLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Drain the recorded events
    pub fn take(&self) -> Vec<E> {
        std::mem::take(&mut *self.events.lock())
    }
}

impl<E: Clone> EventLog<E> {
    pub fn events(&self) -> Vec<E> {
        self.events.lock().clone()
    }
}

impl<E: Send> EventDispatcher<E> for EventLog<E> {
    fn dispatch(&self, event: E) {
        self.events.lock().push(event);
    }
}
