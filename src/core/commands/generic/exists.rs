// src/core/commands/generic/exists.rs

use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::extract_bytes;
use crate::core::protocol::RespFrame;
use crate::core::storage::db::ExecutionContext;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

/// `EXISTS key [key ...]` counts how many of the named keys are bound,
/// counting repeats.
#[derive(Debug, Clone, Default)]
pub struct Exists {
    pub keys: Vec<Bytes>,
}

impl ParseCommand for Exists {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        if args.is_empty() {
            return Err(FinityDBError::WrongArgumentCount("EXISTS".to_string()));
        }
        let keys = args.iter().map(extract_bytes).collect::<Result<_, _>>()?;
        Ok(Exists { keys })
    }
}

#[async_trait]
impl ExecutableCommand for Exists {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let count = self
            .keys
            .iter()
            .filter(|key| ctx.keyspace.contains_key(key))
            .count();
        Ok((RespValue::Integer(count as i64), WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for Exists {
    fn name(&self) -> &'static str {
        "exists"
    }
    fn arity(&self) -> i64 {
        -2
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn get_keys(&self) -> Vec<Bytes> {
        self.keys.clone()
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        self.keys.clone()
    }
}
