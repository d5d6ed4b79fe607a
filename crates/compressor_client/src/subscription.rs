use std::sync::Arc;

use client_logging::client_info;

use crate::{BackendError, EventSink, EventSource, SubscriptionId};

/// Scoped registration with an [`EventSource`]; unsubscribes when dropped.
pub struct EventSubscription {
    source: Arc<dyn EventSource>,
    id: SubscriptionId,
}

impl EventSubscription {
    pub fn acquire(
        source: Arc<dyn EventSource>,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, BackendError> {
        let id = source.subscribe(sink)?;
        client_info!("Subscribed to backend events ({:?})", id);
        Ok(Self { source, id })
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }
}

impl Drop for EventSubscription {
    fn drop(&mut self) {
        self.source.unsubscribe(self.id);
        client_info!("Unsubscribed from backend events ({:?})", self.id);
    }
}
