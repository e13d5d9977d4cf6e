// src/core/storage/data_types.rs

//! Defines the structures stored in the keyspace: `StoredValue` and the
//! `DataValue` enum.

use crate::core::storage::xset::XSet;

/// A wrapper for all values bound to a key, containing the data and its
/// bookkeeping metadata.
#[derive(Debug, Clone)]
pub struct StoredValue {
    pub data: DataValue,
    /// Bumped on every mutation; an optimistic-concurrency hook.
    pub version: u64,
    /// The calculated size of the `data` field in bytes.
    pub size: usize,
}

impl StoredValue {
    pub fn new(data: DataValue) -> Self {
        let size = data.memory_usage();
        Self {
            data,
            version: 1,
            size,
        }
    }

    /// Records a mutation: bumps the version and refreshes the cached size.
    pub fn mark_modified(&mut self) {
        self.version = self.version.wrapping_add(1);
        self.size = self.data.memory_usage();
    }
}

/// The value types a key can hold.
#[derive(Debug, Clone)]
pub enum DataValue {
    XSet(XSet),
}

impl DataValue {
    pub fn memory_usage(&self) -> usize {
        match self {
            DataValue::XSet(xset) => xset.memory_usage(),
        }
    }

    /// The type name reported by the TYPE command.
    pub fn type_name(&self) -> &'static str {
        match self {
            DataValue::XSet(_) => "xset",
        }
    }
}
