//! Registry event channel (C4).
//!
//! Subscribers are plain synchronous closures invoked in subscription order
//! on the thread that triggered the event. A panicking subscriber is caught
//! and logged so it cannot take down the caller (the registry or the health
//! supervisor) or stop the remaining subscribers from running.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, RwLock};

use uuid::Uuid;

use crate::model::InstanceRecord;

/// Something the registry or health supervisor observed happen.
#[derive(Debug, Clone)]
pub enum RegistryEvent {
    Registered(InstanceRecord),
    Unregistered { id: Uuid, service_type: String },
    MarkedUnhealthy { id: Uuid, service_type: String },
    MarkedHealthy { id: Uuid, service_type: String },
}

type Subscriber = Arc<dyn Fn(&RegistryEvent) + Send + Sync>;

/// Fan-out point for [`RegistryEvent`]s.
///
/// Cloning an `EventChannel` shares the same subscriber list — construct one
/// per [`crate::registry::RegistryCore`] and clone it into the health
/// supervisor rather than building a second channel.
#[derive(Clone, Default)]
pub struct EventChannel {
    subscribers: Arc<RwLock<Vec<Subscriber>>>,
}

impl EventChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. Returns nothing to unsubscribe with — the
    /// registry has no use case for removing a subscriber once added.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&RegistryEvent) + Send + Sync + 'static,
    {
        self.subscribers.write().unwrap().push(Arc::new(callback));
    }

    /// Synchronously notify every subscriber in subscription order.
    pub fn emit(&self, event: RegistryEvent) {
        let subscribers = self.subscribers.read().unwrap().clone();
        for subscriber in subscribers {
            let event_ref = &event;
            if catch_unwind(AssertUnwindSafe(|| subscriber(event_ref))).is_err() {
                tracing::error!("registry event subscriber panicked, isolating and continuing");
            }
        }
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.read().unwrap().len()
    }
}
