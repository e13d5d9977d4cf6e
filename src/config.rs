// src/config.rs

//! Manages server configuration: loading from a TOML file and defaulting.

use crate::core::storage::xset::Pruning;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The full server configuration.
///
/// Every field has a default so that a partial (or absent) configuration
/// file still produces a runnable server.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Fallback tracing filter when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default capacity bound applied to newly created finite sorted sets.
    #[serde(default = "default_xset_finity")]
    pub xset_finity: u64,

    /// Default pruning direction for newly created finite sorted sets.
    #[serde(default)]
    pub xset_pruning: Pruning,

    /// A set whose cardinality exceeds this stays out of the packed encoding.
    /// `0` disables the packed encoding entirely.
    #[serde(default = "default_xset_max_packed_entries")]
    pub xset_max_packed_entries: usize,

    /// A member longer than this (in bytes) forces the indexed encoding.
    #[serde(default = "default_xset_max_packed_value")]
    pub xset_max_packed_value: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    7801
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_xset_finity() -> u64 {
    128
}
fn default_xset_max_packed_entries() -> usize {
    128
}
fn default_xset_max_packed_value() -> usize {
    64
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            xset_finity: default_xset_finity(),
            xset_pruning: Pruning::default(),
            xset_max_packed_entries: default_xset_max_packed_entries(),
            xset_max_packed_value: default_xset_max_packed_value(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file. A missing file is not an
    /// error: the defaults are used so the server can start bare.
    pub fn from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()
            .with_context(|| format!("failed to read configuration file '{path}'"))?;
        settings
            .try_deserialize()
            .with_context(|| format!("failed to parse configuration file '{path}'"))
    }
}
