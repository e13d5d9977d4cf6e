// src/core/commands/xset/xscore.rs

use super::helpers::format_score;
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
pub struct XScore {
    pub key: Bytes,
    pub member: Bytes,
}

impl ParseCommand for XScore {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 2, "XSCORE")?;
        Ok(XScore {
            key: extract_bytes(&args[0])?,
            member: extract_bytes(&args[1])?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XScore {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let reply = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                match xset.score_of(&self.member) {
                    Some(score) => RespValue::BulkString(format_score(score)),
                    None => RespValue::Null,
                }
            }
            None => RespValue::Null,
        };
        Ok((reply, WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XScore {
    fn name(&self) -> &'static str {
        "xscore"
    }
    fn arity(&self) -> i64 {
        3
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        vec![self.key.clone(), self.member.clone()]
    }
}
