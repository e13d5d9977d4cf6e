// src/core/commands/xset/xsetoptions.rs

//! `XSETOPTIONS key [FINITY n] [PRUNING p] [ELEMENTS]`: updates a set's
//! capacity attributes and re-runs the enforcer.

use super::prune_logic::{PruneOptions, enforce_capacity};
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::{extract_bytes, extract_string};
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::DataValue;
use crate::core::storage::db::ExecutionContext;
use crate::core::storage::xset::Pruning;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;
use std::str::FromStr;

#[derive(Debug, Clone, Default)]
pub struct XSetOptions {
    pub key: Bytes,
    pub prune: PruneOptions,
}

impl ParseCommand for XSetOptions {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        if args.is_empty() {
            return Err(FinityDBError::WrongArgumentCount("XSETOPTIONS".to_string()));
        }
        let key = extract_bytes(&args[0])?;
        let mut prune = PruneOptions::default();

        // Unlike XADD there is no score/member tail here, so any
        // unrecognized token is a syntax error.
        let mut i = 1;
        while i < args.len() {
            let token = extract_string(&args[i])?;
            match token.to_ascii_lowercase().as_str() {
                "finity" => {
                    if i + 1 >= args.len() {
                        return Err(FinityDBError::SyntaxError);
                    }
                    let finity: i64 = extract_string(&args[i + 1])?
                        .parse()
                        .map_err(|_| FinityDBError::FinityNotANumber)?;
                    if finity <= 0 {
                        return Err(FinityDBError::InvalidFinity);
                    }
                    prune.modify_finity = Some(finity as u64);
                    i += 2;
                }
                "pruning" => {
                    if i + 1 >= args.len() {
                        return Err(FinityDBError::SyntaxError);
                    }
                    let pruning = Pruning::from_str(&extract_string(&args[i + 1])?)
                        .map_err(|_| FinityDBError::SyntaxError)?;
                    prune.modify_pruning = Some(pruning);
                    i += 2;
                }
                "elements" => {
                    prune.reply_elements = true;
                    i += 1;
                }
                _ => return Err(FinityDBError::SyntaxError),
            }
        }
        Ok(XSetOptions { key, prune })
    }
}

#[async_trait]
impl ExecutableCommand for XSetOptions {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let Some(entry) = ctx.keyspace.get_mut(&self.key) else {
            return Ok((RespValue::Integer(0), WriteOutcome::DidNotWrite));
        };
        let DataValue::XSet(xset) = &mut entry.data;

        let prune_result = enforce_capacity(&ctx.state, xset, &self.prune);
        let modified = prune_result.deleted > 0
            || self.prune.modify_finity.is_some()
            || self.prune.modify_pruning.is_some();
        if modified {
            entry.mark_modified();
        }

        let reply = prune_result.reply.unwrap_or(RespValue::Integer(1));
        let outcome = if modified {
            WriteOutcome::Write { keys_modified: 1 }
        } else {
            WriteOutcome::DidNotWrite
        };
        Ok((reply, outcome))
    }
}

impl CommandSpec for XSetOptions {
    fn name(&self) -> &'static str {
        "xsetoptions"
    }
    fn arity(&self) -> i64 {
        -2
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        let mut args = vec![self.key.clone()];
        if let Some(finity) = self.prune.modify_finity {
            args.push("FINITY".into());
            args.push(finity.to_string().into());
        }
        if let Some(pruning) = self.prune.modify_pruning {
            args.push("PRUNING".into());
            args.push(pruning.to_string().into());
        }
        if self.prune.reply_elements {
            args.push("ELEMENTS".into());
        }
        args
    }
}
