// src/core/commands/xset/xrank.rs

//! `XRANK` and `XREVRANK`: the 0-based position of a member from either
//! end of the (score, member) ordering.

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
pub struct XRank {
    pub key: Bytes,
    pub member: Bytes,
    pub reverse: bool,
}

impl XRank {
    fn parse_generic(args: &[RespFrame], reverse: bool, cmd: &str) -> Result<Self, FinityDBError> {
        validate_arg_count(args, 2, cmd)?;
        Ok(XRank {
            key: extract_bytes(&args[0])?,
            member: extract_bytes(&args[1])?,
            reverse,
        })
    }
}

impl ParseCommand for XRank {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        Self::parse_generic(args, false, "XRANK")
    }
}

#[async_trait]
impl ExecutableCommand for XRank {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let reply = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                match xset.rank_of(&self.member, self.reverse) {
                    Some(rank) => RespValue::Integer(rank as i64),
                    None => RespValue::Null,
                }
            }
            None => RespValue::Null,
        };
        Ok((reply, WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XRank {
    fn name(&self) -> &'static str {
        if self.reverse { "xrevrank" } else { "xrank" }
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

/// `XREVRANK`: rank 0 is the entry with the highest (score, member).
#[derive(Debug, Clone, Default)]
pub struct XRevRank {
    pub rank: XRank,
}

impl ParseCommand for XRevRank {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        Ok(XRevRank {
            rank: XRank::parse_generic(args, true, "XREVRANK")?,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XRevRank {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        self.rank.execute(ctx).await
    }
}

impl CommandSpec for XRevRank {
    fn name(&self) -> &'static str {
        "xrevrank"
    }
    fn arity(&self) -> i64 {
        3
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn get_keys(&self) -> Vec<Bytes> {
        self.rank.get_keys()
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        self.rank.to_resp_args()
    }
}
