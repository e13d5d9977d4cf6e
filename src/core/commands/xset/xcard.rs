// src/core/commands/xset/xcard.rs

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
pub struct XCard {
    pub key: Bytes,
}

impl ParseCommand for XCard {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 1, "XCARD")?;
        Ok(XCard {
            key: extract_bytes(&args[0])?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XCard {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let len = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                xset.len() as i64
            }
            None => 0,
        };
        Ok((RespValue::Integer(len), WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XCard {
    fn name(&self) -> &'static str {
        "xcard"
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
