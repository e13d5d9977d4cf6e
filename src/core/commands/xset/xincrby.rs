// src/core/commands/xset/xincrby.rs

use super::xadd::{XAdd, parse_xadd_args};
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::protocol::RespFrame;
use crate::core::storage::db::ExecutionContext;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

/// `XINCRBY key [options] delta member` is `XADD` with the INCR flag
/// forced on: the reply is the resulting score (or null when the member
/// did not end up in the set).
#[derive(Debug, Clone, Default)]
pub struct XIncrBy {
    pub add: XAdd,
}

impl ParseCommand for XIncrBy {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        let add = parse_xadd_args(args, true, "XINCRBY")?;
        Ok(XIncrBy { add })
    }
}

#[async_trait]
impl ExecutableCommand for XIncrBy {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        self.add.execute(ctx).await
    }
}

impl CommandSpec for XIncrBy {
    fn name(&self) -> &'static str {
        "xincrby"
    }
    fn arity(&self) -> i64 {
        -4
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE | CommandFlags::DENY_OOM
    }
    fn get_keys(&self) -> Vec<Bytes> {
        self.add.get_keys()
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        self.add.to_resp_args()
    }
}
