// src/core/events.rs

//! The keyspace notification bus. Write commands publish events describing
//! what happened to which key; observers (tests, future pub/sub bridges)
//! subscribe through a broadcast channel.

use bytes::Bytes;
use tokio::sync::broadcast;
use tracing::debug;

/// Capacity of the broadcast channel. Slow subscribers lag rather than
/// blocking writers.
const NOTIFICATION_BUS_CAPACITY: usize = 16384;

/// The class of a keyspace event, mirroring the command family that
/// produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Events produced by finite-sorted-set commands (`xadd`, `xrem`, ...).
    XSet,
    /// Generic keyspace events (`del`).
    Generic,
}

/// A single keyspace notification.
#[derive(Debug, Clone)]
pub struct KeyspaceEvent {
    pub kind: EventKind,
    /// The event name, e.g. `xadd`, `xincr`, `xremrangebyscore`, `del`.
    pub event: &'static str,
    pub key: Bytes,
}

/// The notification bus itself. Cheap to publish to even with no
/// subscribers.
#[derive(Debug)]
pub struct NotificationBus {
    sender: broadcast::Sender<KeyspaceEvent>,
}

impl NotificationBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(NOTIFICATION_BUS_CAPACITY);
        Self { sender }
    }

    /// Publishes an event. It's fine if nobody is listening.
    pub fn publish(&self, kind: EventKind, event: &'static str, key: &Bytes) {
        let notification = KeyspaceEvent {
            kind,
            event,
            key: key.clone(),
        };
        if self.sender.send(notification).is_err() {
            debug!("keyspace event '{event}' published with no active subscribers");
        }
    }

    /// Provides a new receiver for an observer to subscribe to events.
    pub fn subscribe(&self) -> broadcast::Receiver<KeyspaceEvent> {
        self.sender.subscribe()
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}
