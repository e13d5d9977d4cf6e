// src/core/commands/xset/xrangebyscore.rs

//! `XRANGEBYSCORE` and `XREVRANGEBYSCORE`: enumeration of a score interval
//! with optional `WITHSCORES` and `LIMIT offset count`.

use super::helpers::{format_entries_reply, parse_score_range_args, parse_score_tail_args};
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::extract_bytes;
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::DataValue;
use crate::core::storage::db::ExecutionContext;
use crate::core::storage::xset::range::ScoreRange;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, Default)]
pub struct XRangeByScore {
    pub key: Bytes,
    pub range: ScoreRange,
    pub with_scores: bool,
    pub offset: i64,
    pub limit: i64,
    pub reverse: bool,
}

impl XRangeByScore {
    fn parse_generic(args: &[RespFrame], reverse: bool, cmd: &str) -> Result<Self, FinityDBError> {
        if args.len() < 3 {
            return Err(FinityDBError::WrongArgumentCount(cmd.to_string()));
        }
        let key = extract_bytes(&args[0])?;
        // The reversed form takes its bounds as [max, min].
        let (min_idx, max_idx) = if reverse { (2, 1) } else { (1, 2) };
        let range = parse_score_range_args(&args[min_idx], &args[max_idx])?;
        let (with_scores, offset, limit) = parse_score_tail_args(args, 3, true)?;
        Ok(XRangeByScore {
            key,
            range,
            with_scores,
            offset,
            limit,
            reverse,
        })
    }
}

impl ParseCommand for XRangeByScore {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        Self::parse_generic(args, false, "XRANGEBYSCORE")
    }
}

#[async_trait]
impl ExecutableCommand for XRangeByScore {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let reply = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                let entries =
                    xset.range_by_score(&self.range, self.reverse, self.offset, self.limit);
                format_entries_reply(entries, self.with_scores)
            }
            None => RespValue::Array(vec![]),
        };
        Ok((reply, WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XRangeByScore {
    fn name(&self) -> &'static str {
        if self.reverse {
            "xrevrangebyscore"
        } else {
            "xrangebyscore"
        }
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
        let (first, second) = if self.reverse {
            (self.range.max_arg(), self.range.min_arg())
        } else {
            (self.range.min_arg(), self.range.max_arg())
        };
        let mut args = vec![self.key.clone(), first.into(), second.into()];
        if self.with_scores {
            args.push("WITHSCORES".into());
        }
        if self.offset != 0 || self.limit != -1 {
            args.push("LIMIT".into());
            args.push(self.offset.to_string().into());
            args.push(self.limit.to_string().into());
        }
        args
    }
}

#[derive(Debug, Clone, Default)]
pub struct XRevRangeByScore {
    pub range: XRangeByScore,
}

impl ParseCommand for XRevRangeByScore {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        Ok(XRevRangeByScore {
            range: XRangeByScore::parse_generic(args, true, "XREVRANGEBYSCORE")?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XRevRangeByScore {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        self.range.execute(ctx).await
    }
}

impl CommandSpec for XRevRangeByScore {
    fn name(&self) -> &'static str {
        "xrevrangebyscore"
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
