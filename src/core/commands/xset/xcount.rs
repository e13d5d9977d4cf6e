// src/core/commands/xset/xcount.rs

use super::helpers::parse_score_range_args;
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::{extract_bytes, validate_arg_count};
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::DataValue;
use crate::core::storage::db::ExecutionContext;
use crate::core::storage::xset::range::ScoreRange;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, Default)]
pub struct XCount {
    pub key: Bytes,
    pub range: ScoreRange,
}

impl ParseCommand for XCount {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 3, "XCOUNT")?;
        Ok(XCount {
            key: extract_bytes(&args[0])?,
            range: parse_score_range_args(&args[1], &args[2])?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XCount {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let count = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                xset.count_by_score(&self.range) as i64
            }
            None => 0,
        };
        Ok((RespValue::Integer(count), WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XCount {
    fn name(&self) -> &'static str {
        "xcount"
    }
    fn arity(&self) -> i64 {
        4
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        vec![
            self.key.clone(),
            self.range.min_arg().into(),
            self.range.max_arg().into(),
        ]
    }
}
