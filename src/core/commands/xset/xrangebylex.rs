// src/core/commands/xset/xrangebylex.rs

//! `XRANGEBYLEX` and `XREVRANGEBYLEX`: byte-lexicographic enumeration.
//! No `WITHSCORES` here; the range is only meaningful within a single
//! score stratum.

use super::helpers::{format_entries_reply, parse_lex_range_args, parse_score_tail_args};
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::extract_bytes;
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::DataValue;
use crate::core::storage::db::ExecutionContext;
use crate::core::storage::xset::range::LexRange;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, Default)]
pub struct XRangeByLex {
    pub key: Bytes,
    pub range: LexRange,
    pub offset: i64,
    pub limit: i64,
    pub reverse: bool,
}

impl XRangeByLex {
    fn parse_generic(args: &[RespFrame], reverse: bool, cmd: &str) -> Result<Self, FinityDBError> {
        if args.len() < 3 {
            return Err(FinityDBError::WrongArgumentCount(cmd.to_string()));
        }
        let key = extract_bytes(&args[0])?;
        // The reversed form takes its bounds as [max, min].
        let (min_idx, max_idx) = if reverse { (2, 1) } else { (1, 2) };
        let range = parse_lex_range_args(&args[min_idx], &args[max_idx])?;
        let (_, offset, limit) = parse_score_tail_args(args, 3, false)?;
        Ok(XRangeByLex {
            key,
            range,
            offset,
            limit,
            reverse,
        })
    }
}

impl ParseCommand for XRangeByLex {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        Self::parse_generic(args, false, "XRANGEBYLEX")
    }
}

#[async_trait]
impl ExecutableCommand for XRangeByLex {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let reply = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                let entries = xset.range_by_lex(&self.range, self.reverse, self.offset, self.limit);
                format_entries_reply(entries, false)
            }
            None => RespValue::Array(vec![]),
        };
        Ok((reply, WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XRangeByLex {
    fn name(&self) -> &'static str {
        if self.reverse { "xrevrangebylex" } else { "xrangebylex" }
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
            (self.range.max.to_string(), self.range.min.to_string())
        } else {
            (self.range.min.to_string(), self.range.max.to_string())
        };
        let mut args = vec![self.key.clone(), first.into(), second.into()];
        if self.offset != 0 || self.limit != -1 {
            args.push("LIMIT".into());
            args.push(self.offset.to_string().into());
            args.push(self.limit.to_string().into());
        }
        args
    }
}

#[derive(Debug, Clone, Default)]
pub struct XRevRangeByLex {
    pub range: XRangeByLex,
}

impl ParseCommand for XRevRangeByLex {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        Ok(XRevRangeByLex {
            range: XRangeByLex::parse_generic(args, true, "XREVRANGEBYLEX")?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XRevRangeByLex {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        self.range.execute(ctx).await
    }
}

impl CommandSpec for XRevRangeByLex {
    fn name(&self) -> &'static str {
        "xrevrangebylex"
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
