// src/core/commands/xset/xgetoptions.rs

//! `XGETFINITY` and `XGETPRUNING`: read back a set's capacity attributes.

use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::{extract_bytes, validate_arg_count};
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::DataValue;
use crate::core::storage::db::ExecutionContext;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, Default)]
pub struct XGetFinity {
    pub key: Bytes,
}

impl ParseCommand for XGetFinity {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 1, "XGETFINITY")?;
        Ok(XGetFinity {
            key: extract_bytes(&args[0])?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XGetFinity {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let reply = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                RespValue::Integer(xset.finity() as i64)
            }
            None => RespValue::Integer(0),
        };
        Ok((reply, WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XGetFinity {
    fn name(&self) -> &'static str {
        "xgetfinity"
    }
    fn arity(&self) -> i64 {
        2
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct XGetPruning {
    pub key: Bytes,
}

impl ParseCommand for XGetPruning {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 1, "XGETPRUNING")?;
        Ok(XGetPruning {
            key: extract_bytes(&args[0])?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XGetPruning {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let reply = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                RespValue::BulkString(xset.pruning().to_string().into())
            }
            None => RespValue::Null,
        };
        Ok((reply, WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XGetPruning {
    fn name(&self) -> &'static str {
        "xgetpruning"
    }
    fn arity(&self) -> i64 {
        2
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
}
