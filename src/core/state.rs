// src/core/state.rs

//! Process-wide server state shared by every connection and command.

use crate::config::Config;
use crate::core::events::{EventKind, NotificationBus};
use bytes::Bytes;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// `ServerState` bundles the configuration, the keyspace notification bus
/// and the global write counter. Commands reach it through their
/// `ExecutionContext`.
#[derive(Debug)]
pub struct ServerState {
    pub config: Config,
    pub notifications: NotificationBus,
    /// Counts individual entry mutations (adds, updates, removals and
    /// capacity evictions) since startup.
    dirty: AtomicU64,
}

impl ServerState {
    pub fn new(config: Config) -> Arc<Self> {
        Arc::new(Self {
            config,
            notifications: NotificationBus::new(),
            dirty: AtomicU64::new(0),
        })
    }

    /// Bumps the write counter by `count` mutations.
    pub fn add_dirty(&self, count: u64) {
        self.dirty.fetch_add(count, Ordering::Relaxed);
    }

    pub fn dirty(&self) -> u64 {
        self.dirty.load(Ordering::Relaxed)
    }

    /// Shorthand for publishing a keyspace event.
    pub fn notify(&self, kind: EventKind, event: &'static str, key: &Bytes) {
        self.notifications.publish(kind, event, key);
    }
}
