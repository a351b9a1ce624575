//! Deletion notifications from sellers to interested brokers.

use crate::property::Address;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Receives the address of every property removed through a seller.
pub trait DeletionListener: Send + Sync {
    fn on_deleted(&self, address: &Address);
}

/// Ordered fan-out to every subscribed listener. Listeners are called
/// synchronously in subscription order.
#[derive(Default, Clone)]
pub struct DeletionNotifier {
    listeners: Vec<Arc<dyn DeletionListener>>,
}

impl DeletionNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Arc<dyn DeletionListener>) {
        self.listeners.push(listener);
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn notify(&self, address: &Address) {
        debug!(%address, listeners = self.listeners.len(), "publishing deletion");
        for listener in &self.listeners {
            listener.on_deleted(address);
        }
    }
}

impl DeletionListener for DeletionNotifier {
    fn on_deleted(&self, address: &Address) {
        self.notify(address);
    }
}

impl fmt::Debug for DeletionNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeletionNotifier")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Notification text delivered to listeners.
pub fn deletion_message(address: &Address) -> String {
    format!("Notification: Property at address {address} has been deleted")
}
