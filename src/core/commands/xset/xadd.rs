// src/core/commands/xset/xadd.rs

use super::helpers::format_score;
use super::prune_logic::{PruneOptions, enforce_capacity};
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::{extract_bytes, extract_string};
use crate::core::events::EventKind;
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::{DataValue, StoredValue};
use crate::core::storage::db::ExecutionContext;
use crate::core::storage::xset::{PackedLimits, Pruning, UpsertOutcome, UpsertPolicy, XSet};
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;
use std::str::FromStr;

/// Represents the full `XADD` command with all its options. `XINCRBY` is
/// the same command with the INCR flag forced on.
#[derive(Debug, Clone, Default)]
pub struct XAdd {
    pub key: Bytes,
    /// Parsed (score, member) pairs; parsing them up front keeps a score
    /// syntax error from leaving a half-applied command behind.
    pub pairs: Vec<(f64, Bytes)>,
    pub nx: bool,
    pub xx: bool,
    pub ch: bool,
    pub incr: bool,
    pub prune: PruneOptions,
}

impl ParseCommand for XAdd {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        parse_xadd_args(args, false, "XADD")
    }
}

/// Parses `key [NX|XX] [CH] [INCR] [FINITY n] [PRUNING p] [ELEMENTS]
/// score member [score member ...]`. Option keywords may repeat and appear
/// in any order; the first unrecognized token starts the pairs.
pub(super) fn parse_xadd_args(
    args: &[RespFrame],
    incr: bool,
    cmd: &str,
) -> Result<XAdd, FinityDBError> {
    if args.is_empty() {
        return Err(FinityDBError::WrongArgumentCount(cmd.to_string()));
    }
    let key = extract_bytes(&args[0])?;

    let mut nx = false;
    let mut xx = false;
    let mut ch = false;
    let mut incr = incr;
    let mut prune = PruneOptions::default();

    let mut i = 1;
    while i < args.len() {
        let Ok(token) = extract_string(&args[i]) else {
            break;
        };
        match token.to_ascii_lowercase().as_str() {
            "nx" => {
                nx = true;
                i += 1;
            }
            "xx" => {
                xx = true;
                i += 1;
            }
            "ch" => {
                ch = true;
                i += 1;
            }
            "incr" => {
                incr = true;
                i += 1;
            }
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
            _ => break,
        }
    }

    let rest = &args[i..];
    if rest.is_empty() || rest.len() % 2 != 0 {
        return Err(FinityDBError::SyntaxError);
    }

    if nx && xx {
        return Err(FinityDBError::IncompatibleOptions(
            "XX and NX options at the same time are not compatible".to_string(),
        ));
    }
    if incr && rest.len() > 2 {
        return Err(FinityDBError::IncompatibleOptions(
            "INCR option supports a single increment-element pair".to_string(),
        ));
    }

    let pairs = rest
        .chunks_exact(2)
        .map(|chunk| -> Result<(f64, Bytes), FinityDBError> {
            let score: f64 = extract_string(&chunk[0])?
                .parse()
                .map_err(|_| FinityDBError::NotAFloat)?;
            if score.is_nan() {
                return Err(FinityDBError::NotAFloat);
            }
            let member = extract_bytes(&chunk[1])?;
            Ok((score, member))
        })
        .collect::<Result<_, _>>()?;

    Ok(XAdd {
        key,
        pairs,
        nx,
        xx,
        ch,
        incr,
        prune,
    })
}

#[async_trait]
impl ExecutableCommand for XAdd {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let limits = PackedLimits {
            max_entries: ctx.state.config.xset_max_packed_entries,
            max_value: ctx.state.config.xset_max_packed_value,
        };

        if !ctx.keyspace.contains_key(&self.key) {
            if self.xx {
                // No key + XX option: nothing to do, nothing to evict.
                let reply = if self.prune.reply_elements {
                    RespValue::Array(vec![])
                } else if self.incr {
                    RespValue::Null
                } else {
                    RespValue::Integer(0)
                };
                return Ok((reply, WriteOutcome::DidNotWrite));
            }
            let finity = self
                .prune
                .modify_finity
                .unwrap_or(ctx.state.config.xset_finity);
            let pruning = self
                .prune
                .modify_pruning
                .unwrap_or(ctx.state.config.xset_pruning);
            let first_member_len = self.pairs.first().map(|(_, m)| m.len()).unwrap_or(0);
            let xset = XSet::for_first_member(first_member_len, finity, pruning, &limits);
            ctx.keyspace
                .get_or_insert_with_mut(self.key.clone(), || {
                    StoredValue::new(DataValue::XSet(xset))
                });
        }

        let entry = ctx
            .keyspace
            .get_mut(&self.key)
            .ok_or_else(|| FinityDBError::Internal("key vanished during XADD".to_string()))?;
        let DataValue::XSet(xset) = &mut entry.data;

        let policy = UpsertPolicy {
            nx: self.nx,
            xx: self.xx,
            incr: self.incr,
        };
        let mut added = 0i64;
        let mut updated = 0i64;
        let mut protected = 0i64;
        let mut last_score = 0.0;
        for (score, member) in &self.pairs {
            match xset.upsert(member, *score, policy, &limits)? {
                UpsertOutcome::Added(score) => {
                    added += 1;
                    protected += 1;
                    last_score = score;
                }
                UpsertOutcome::Updated(score) => {
                    updated += 1;
                    protected += 1;
                    last_score = score;
                }
                UpsertOutcome::Unchanged(score) => {
                    protected += 1;
                    last_score = score;
                }
                UpsertOutcome::Skipped => {}
            }
        }

        let prune_result = enforce_capacity(&ctx.state, xset, &self.prune);

        let changed = added + updated;
        ctx.state.add_dirty(changed as u64);
        let options_modified =
            self.prune.modify_finity.is_some() || self.prune.modify_pruning.is_some();
        if changed > 0 || prune_result.deleted > 0 || options_modified {
            entry.mark_modified();
        }

        let reply = if let Some(reply) = prune_result.reply {
            reply
        } else if self.incr {
            if protected > 0 {
                RespValue::BulkString(format_score(last_score))
            } else {
                RespValue::Null
            }
        } else {
            RespValue::Integer(if self.ch { changed } else { added })
        };

        if changed > 0 {
            ctx.state.notify(
                EventKind::XSet,
                if self.incr { "xincr" } else { "xadd" },
                &self.key,
            );
        }

        let outcome = if changed > 0 || prune_result.deleted > 0 {
            WriteOutcome::Write { keys_modified: 1 }
        } else {
            WriteOutcome::DidNotWrite
        };
        Ok((reply, outcome))
    }
}

impl CommandSpec for XAdd {
    fn name(&self) -> &'static str {
        "xadd"
    }
    fn arity(&self) -> i64 {
        -4
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE | CommandFlags::DENY_OOM
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        let mut args = vec![self.key.clone()];
        if self.nx {
            args.push("NX".into());
        }
        if self.xx {
            args.push("XX".into());
        }
        if self.ch {
            args.push("CH".into());
        }
        if self.incr {
            args.push("INCR".into());
        }
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
        args.extend(
            self.pairs
                .iter()
                .flat_map(|(score, member)| [format_score(*score), member.clone()]),
        );
        args
    }
}
