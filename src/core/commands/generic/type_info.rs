// src/core/commands/generic/type_info.rs

use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::{extract_bytes, validate_arg_count};
use crate::core::protocol::RespFrame;
use crate::core::storage::db::ExecutionContext;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

/// `TYPE key` reports the type of the bound value, or `none`.
#[derive(Debug, Clone, Default)]
pub struct TypeInfo {
    pub key: Bytes,
}

impl ParseCommand for TypeInfo {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 1, "TYPE")?;
        Ok(TypeInfo {
            key: extract_bytes(&args[0])?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for TypeInfo {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let name = match ctx.keyspace.get(&self.key) {
            Some(entry) => entry.data.type_name(),
            None => "none",
        };
        Ok((
            RespValue::SimpleString(name.to_string()),
            WriteOutcome::DidNotWrite,
        ))
    }
}

impl CommandSpec for TypeInfo {
    fn name(&self) -> &'static str {
        "type"
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
