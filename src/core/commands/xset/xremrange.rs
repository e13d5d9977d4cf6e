// src/core/commands/xset/xremrange.rs

//! `XREMRANGEBYRANK`, `XREMRANGEBYSCORE` and `XREMRANGEBYLEX`: bulk
//! deletion of a rank, score or lex window. The key is unbound when the
//! set empties.

use super::helpers::{parse_lex_range_args, parse_score_range_args};
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::{extract_bytes, extract_i64, validate_arg_count};
use crate::core::events::EventKind;
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::DataValue;
use crate::core::storage::db::ExecutionContext;
use crate::core::storage::xset::range::{LexRange, ScoreRange};
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

/// Which window a removal command addresses.
#[derive(Debug, Clone)]
pub enum RemRange {
    Rank { start: i64, stop: i64 },
    Score(ScoreRange),
    Lex(LexRange),
}

impl Default for RemRange {
    fn default() -> Self {
        RemRange::Rank { start: 0, stop: -1 }
    }
}

impl RemRange {
    fn event(&self) -> &'static str {
        match self {
            RemRange::Rank { .. } => "xremrangebyrank",
            RemRange::Score(_) => "xremrangebyscore",
            RemRange::Lex(_) => "xremrangebylex",
        }
    }
}

/// Shared executor behind the three removal commands.
#[derive(Debug, Clone, Default)]
pub struct XRemRange {
    pub key: Bytes,
    pub range: RemRange,
}

#[async_trait]
impl ExecutableCommand for XRemRange {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let Some(entry) = ctx.keyspace.get_mut(&self.key) else {
            return Ok((RespValue::Integer(0), WriteOutcome::DidNotWrite));
        };
        let DataValue::XSet(xset) = &mut entry.data;

        let deleted = match &self.range {
            RemRange::Rank { start, stop } => match xset.normalize_rank_window(*start, *stop) {
                Some((start, stop)) => xset.delete_range_by_rank(start, stop),
                None => 0,
            },
            RemRange::Score(range) => xset.delete_range_by_score(range),
            RemRange::Lex(range) => xset.delete_range_by_lex(range),
        };
        let key_removed = xset.is_empty();

        let outcome = if deleted > 0 {
            if key_removed {
                ctx.keyspace.pop(&self.key);
                WriteOutcome::Delete { keys_deleted: 1 }
            } else {
                entry.mark_modified();
                WriteOutcome::Write { keys_modified: 1 }
            }
        } else {
            WriteOutcome::DidNotWrite
        };

        if deleted > 0 {
            ctx.state
                .notify(EventKind::XSet, self.range.event(), &self.key);
            if key_removed {
                ctx.state.notify(EventKind::Generic, "del", &self.key);
            }
            ctx.state.add_dirty(deleted as u64);
        }
        Ok((RespValue::Integer(deleted as i64), outcome))
    }
}

impl CommandSpec for XRemRange {
    fn name(&self) -> &'static str {
        self.range.event()
    }
    fn arity(&self) -> i64 {
        4
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        let (first, second) = match &self.range {
            RemRange::Rank { start, stop } => (start.to_string(), stop.to_string()),
            RemRange::Score(range) => (range.min_arg(), range.max_arg()),
            RemRange::Lex(range) => (range.min.to_string(), range.max.to_string()),
        };
        vec![self.key.clone(), first.into(), second.into()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct XRemRangeByRank {
    pub inner: XRemRange,
}

impl ParseCommand for XRemRangeByRank {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 3, "XREMRANGEBYRANK")?;
        Ok(Self {
            inner: XRemRange {
                key: extract_bytes(&args[0])?,
                range: RemRange::Rank {
                    start: extract_i64(&args[1])?,
                    stop: extract_i64(&args[2])?,
                },
            },
        })
    }
}

#[async_trait]
impl ExecutableCommand for XRemRangeByRank {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        self.inner.execute(ctx).await
    }
}

impl CommandSpec for XRemRangeByRank {
    fn name(&self) -> &'static str {
        "xremrangebyrank"
    }
    fn arity(&self) -> i64 {
        4
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE
    }
    fn get_keys(&self) -> Vec<Bytes> {
        self.inner.get_keys()
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        self.inner.to_resp_args()
    }
}

#[derive(Debug, Clone, Default)]
pub struct XRemRangeByScore {
    pub inner: XRemRange,
}

impl ParseCommand for XRemRangeByScore {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 3, "XREMRANGEBYSCORE")?;
        Ok(Self {
            inner: XRemRange {
                key: extract_bytes(&args[0])?,
                range: RemRange::Score(parse_score_range_args(&args[1], &args[2])?),
            },
        })
    }
}

#[async_trait]
impl ExecutableCommand for XRemRangeByScore {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        self.inner.execute(ctx).await
    }
}

impl CommandSpec for XRemRangeByScore {
    fn name(&self) -> &'static str {
        "xremrangebyscore"
    }
    fn arity(&self) -> i64 {
        4
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE
    }
    fn get_keys(&self) -> Vec<Bytes> {
        self.inner.get_keys()
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        self.inner.to_resp_args()
    }
}

#[derive(Debug, Clone, Default)]
pub struct XRemRangeByLex {
    pub inner: XRemRange,
}

impl ParseCommand for XRemRangeByLex {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 3, "XREMRANGEBYLEX")?;
        Ok(Self {
            inner: XRemRange {
                key: extract_bytes(&args[0])?,
                range: RemRange::Lex(parse_lex_range_args(&args[1], &args[2])?),
            },
        })
    }
}

#[async_trait]
impl ExecutableCommand for XRemRangeByLex {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        self.inner.execute(ctx).await
    }
}

impl CommandSpec for XRemRangeByLex {
    fn name(&self) -> &'static str {
        "xremrangebylex"
    }
    fn arity(&self) -> i64 {
        4
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE
    }
    fn get_keys(&self) -> Vec<Bytes> {
        self.inner.get_keys()
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        self.inner.to_resp_args()
    }
}
