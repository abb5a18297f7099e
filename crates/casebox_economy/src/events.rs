//! Store change notifications.
//!
//! Every successful mutation publishes one event to every live subscriber,
//! in mutation order. Dropped receivers are pruned on the next publish.
//!
//! Each subscriber gets a bounded queue. When a subscriber stops draining
//! and its queue fills up, further events for it are dropped (and logged)
//! until it catches up.

use casebox_shared::Knife;
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::Mutex;
use tracing::warn;

/// Default per-subscriber queue length.
pub const SUBSCRIBER_CAPACITY: usize = 1024;

/// Something that changed in the store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreEvent {
    /// A case was opened.
    CaseOpened {
        /// Case that was opened.
        case_id: String,
        /// Knife it produced.
        item: Knife,
        /// Balance after the debit.
        balance: i64,
    },

    /// A knife was sold back.
    ItemSold {
        /// The removed knife.
        item: Knife,
        /// Balance after the credit.
        balance: i64,
    },

    /// A shop knife was bought.
    ItemBought {
        /// The new inventory entry.
        item: Knife,
        /// Balance after the debit.
        balance: i64,
    },

    /// The snapshot after a mutation could not be written.
    PersistenceFailed {
        /// Backend error text.
        reason: String,
    },
}

/// Fan-out of [`StoreEvent`]s to channel subscribers.
#[derive(Debug)]
pub struct EventBus {
    subscribers: Mutex<Vec<Sender<StoreEvent>>>,
    capacity: usize,
}

impl EventBus {
    /// Bus with [`SUBSCRIBER_CAPACITY`] slots per subscriber.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(SUBSCRIBER_CAPACITY)
    }

    /// Bus with `capacity` slots per subscriber (at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
            capacity: capacity.max(1),
        }
    }

    /// Registers a new subscriber.
    ///
    /// The receiver must be drained: once its queue is full, new events for
    /// it are dropped.
    pub fn subscribe(&self) -> Receiver<StoreEvent> {
        let (tx, rx) = bounded(self.capacity);
        self.subscribers.lock().push(tx);
        rx
    }

    /// Sends `event` to every subscriber, dropping disconnected ones.
    pub fn publish(&self, event: &StoreEvent) {
        self.subscribers
            .lock()
            .retain(|tx| match tx.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    warn!(capacity = self.capacity, "subscriber queue full, event dropped");
                    true
                }
                Err(TrySendError::Disconnected(_)) => false,
            });
    }

    /// Live subscriber count as of the last publish.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
