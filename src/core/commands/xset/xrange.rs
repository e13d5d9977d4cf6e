// src/core/commands/xset/xrange.rs

//! `XRANGE` and `XREVRANGE`: rank-window enumeration with the usual
//! negative-index conventions.

use super::helpers::{format_entries_reply, parse_rank_range_args};
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::extract_bytes;
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::DataValue;
use crate::core::storage::db::ExecutionContext;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, Default)]
pub struct XRange {
    pub key: Bytes,
    pub start: i64,
    pub stop: i64,
    pub with_scores: bool,
    pub reverse: bool,
}

impl XRange {
    fn parse_generic(args: &[RespFrame], reverse: bool, cmd: &str) -> Result<Self, FinityDBError> {
        if args.len() < 3 || args.len() > 4 {
            return Err(FinityDBError::WrongArgumentCount(cmd.to_string()));
        }
        let key = extract_bytes(&args[0])?;
        let (start, stop, with_scores) = parse_rank_range_args(args)?;
        Ok(XRange {
            key,
            start,
            stop,
            with_scores,
            reverse,
        })
    }
}

impl ParseCommand for XRange {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        Self::parse_generic(args, false, "XRANGE")
    }
}

#[async_trait]
impl ExecutableCommand for XRange {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let reply = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                let entries = xset.range_by_rank(self.start, self.stop, self.reverse);
                format_entries_reply(entries, self.with_scores)
            }
            None => RespValue::Array(vec![]),
        };
        Ok((reply, WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XRange {
    fn name(&self) -> &'static str {
        if self.reverse { "xrevrange" } else { "xrange" }
    }
    fn arity(&self) -> i64 {
        -4
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        let mut args = vec![
            self.key.clone(),
            self.start.to_string().into(),
            self.stop.to_string().into(),
        ];
        if self.with_scores {
            args.push("WITHSCORES".into());
        }
        args
    }
}

#[derive(Debug, Clone, Default)]
pub struct XRevRange {
    pub range: XRange,
}

impl ParseCommand for XRevRange {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        Ok(XRevRange {
            range: XRange::parse_generic(args, true, "XREVRANGE")?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XRevRange {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        self.range.execute(ctx).await
    }
}

impl CommandSpec for XRevRange {
    fn name(&self) -> &'static str {
        "xrevrange"
    }
    fn arity(&self) -> i64 {
        -4
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn get_keys(&self) -> Vec<Bytes> {
        self.range.get_keys()
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        self.range.to_resp_args()
    }
}
