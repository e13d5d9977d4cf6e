// src/core/storage/db.rs

//! The keyspace and the execution context commands run against.
//!
//! One mutex guards the whole keyspace: commands execute strictly one at a
//! time, each seeing the state every previously completed command produced.

use crate::core::FinityDBError;
use crate::core::RespValue;
use crate::core::commands::Command;
use crate::core::commands::command_trait::{ExecutableCommand, WriteOutcome};
use crate::core::state::ServerState;
use crate::core::storage::data_types::StoredValue;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// The key-to-value map of a database.
#[derive(Debug, Default)]
pub struct Keyspace {
    map: HashMap<Bytes, StoredValue>,
}

impl Keyspace {
    pub fn get(&self, key: &[u8]) -> Option<&StoredValue> {
        self.map.get(key)
    }

    pub fn get_mut(&mut self, key: &[u8]) -> Option<&mut StoredValue> {
        self.map.get_mut(key)
    }

    /// Looks up a key, creating and binding a fresh value when absent.
    pub fn get_or_insert_with_mut(
        &mut self,
        key: Bytes,
        default: impl FnOnce() -> StoredValue,
    ) -> &mut StoredValue {
        self.map.entry(key).or_insert_with(default)
    }

    /// Unbinds a key, returning its value.
    pub fn pop(&mut self, key: &[u8]) -> Option<StoredValue> {
        self.map.remove(key)
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.map.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// `Db` owns the keyspace behind a single mutex.
#[derive(Debug, Default)]
pub struct Db {
    pub entries: Mutex<Keyspace>,
}

impl Db {
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a parsed command under the keyspace lock.
    pub async fn execute(
        &self,
        state: Arc<ServerState>,
        command: &Command,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let guard = self.entries.lock().await;
        let mut ctx = ExecutionContext {
            state,
            keyspace: guard,
        };
        command.execute(&mut ctx).await
    }
}

/// `ExecutionContext` provides all the state a `Command` needs to execute:
/// the server state and the locked keyspace.
pub struct ExecutionContext<'a> {
    pub state: Arc<ServerState>,
    pub keyspace: MutexGuard<'a, Keyspace>,
}
