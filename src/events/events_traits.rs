use log::debug;
use tokio::sync::broadcast;

use crate::events::events_model::ViewEvent;

/// Trait for the collaborator that consumes view-invalidation signals.
///
/// Delivery is fire-and-forget; a notifier must never fail the write that
/// triggered it.
pub trait ViewNotifierTrait: Send + Sync {
    fn notify(&self, event: ViewEvent);
}

/// Notifier for embedders that do not track view state.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopViewNotifier;

impl ViewNotifierTrait for NoopViewNotifier {
    fn notify(&self, _event: ViewEvent) {}
}

/// Notifier backed by a tokio broadcast channel.
pub struct ChannelViewNotifier {
    tx: broadcast::Sender<ViewEvent>,
}

impl ChannelViewNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        ChannelViewNotifier { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.tx.subscribe()
    }
}

impl ViewNotifierTrait for ChannelViewNotifier {
    fn notify(&self, event: ViewEvent) {
        // Err only means nobody is subscribed right now
        if self.tx.send(event).is_err() {
            debug!("View event {:?} had no subscribers", event);
        }
    }
}
