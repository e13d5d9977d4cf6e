// tests/common/mod.rs

//! Shared harness for the command-level tests: a fresh server state plus
//! keyspace, and a helper that runs a textual command line end to end.

#![allow(dead_code)]

use bytes::Bytes;
use finitydb::config::Config;
use finitydb::core::commands::Command;
use finitydb::core::protocol::RespFrame;
use finitydb::core::state::ServerState;
use finitydb::core::storage::db::Db;
use finitydb::core::{FinityDBError, RespValue};
use std::sync::Arc;

pub struct TestServer {
    pub state: Arc<ServerState>,
    pub db: Db,
}

pub fn setup() -> TestServer {
    setup_with(|_| {})
}

pub fn setup_with(tweak: impl FnOnce(&mut Config)) -> TestServer {
    let mut config = Config::default();
    tweak(&mut config);
    TestServer {
        state: ServerState::new(config),
        db: Db::new(),
    }
}

impl TestServer {
    /// Splits a command line on whitespace and executes it as a client
    /// would send it.
    pub async fn run(&self, line: &str) -> Result<RespValue, FinityDBError> {
        let frames: Vec<RespFrame> = line
            .split_whitespace()
            .map(|token| RespFrame::BulkString(Bytes::copy_from_slice(token.as_bytes())))
            .collect();
        let command = Command::from_frame(RespFrame::Array(frames))?;
        self.db
            .execute(self.state.clone(), &command)
            .await
            .map(|(value, _outcome)| value)
    }
}

pub fn bulk(s: &str) -> RespValue {
    RespValue::BulkString(Bytes::copy_from_slice(s.as_bytes()))
}

/// A flat multi-bulk of strings, the shape of the range replies.
pub fn flat(items: &[&str]) -> RespValue {
    RespValue::Array(items.iter().map(|s| bulk(s)).collect())
}

pub fn frame(s: &str) -> RespFrame {
    RespFrame::BulkString(Bytes::copy_from_slice(s.as_bytes()))
}
