// src/core/commands/xset/prune_logic.rs

//! The capacity enforcer: the single routine every write path calls after
//! its mutations to keep a set within its capacity bound.

use super::helpers::format_score;
use crate::core::RespValue;
use crate::core::state::ServerState;
use crate::core::storage::xset::{Pruning, XSet};

/// Capacity-related options carried by XADD / XINCRBY / XSETOPTIONS.
#[derive(Debug, Clone, Copy, Default)]
pub struct PruneOptions {
    /// New capacity bound to store before enforcing, when requested.
    pub modify_finity: Option<u64>,
    /// New pruning direction to store before enforcing, when requested.
    pub modify_pruning: Option<Pruning>,
    /// Reply with the evicted entries instead of the command's normal reply.
    pub reply_elements: bool,
}

/// What the enforcer did and, when ELEMENTS was requested, the reply that
/// takes the place of the command's normal one.
#[derive(Debug, Default)]
pub struct PruneResult {
    pub reply: Option<RespValue>,
    pub deleted: usize,
}

/// Applies any finity/pruning updates, then truncates the set back to its
/// capacity bound from the configured end.
///
/// When `reply_elements` was requested the result carries the command's
/// reply: the evicted (member, score) pairs in ascending (score, member)
/// order, possibly empty. Never unbinds the key, even when the set empties.
pub fn enforce_capacity(
    state: &ServerState,
    xset: &mut XSet,
    options: &PruneOptions,
) -> PruneResult {
    if let Some(finity) = options.modify_finity {
        xset.set_finity(finity);
    }
    if let Some(pruning) = options.modify_pruning {
        xset.set_pruning(pruning);
    }

    let length = xset.len() as u64;
    let finity = xset.finity();
    if length <= finity {
        return PruneResult {
            reply: options.reply_elements.then(|| RespValue::Array(vec![])),
            deleted: 0,
        };
    }

    // 0-based inclusive window of the doomed ranks.
    let (start, stop) = match xset.pruning() {
        Pruning::MaxScore => (finity as usize, length as usize - 1),
        Pruning::MinScore => (0, (length - finity) as usize - 1),
    };

    let reply = options.reply_elements.then(|| {
        let evicted = xset.entries_in_rank_window(start, stop);
        let mut response = Vec::with_capacity(evicted.len() * 2);
        for entry in evicted {
            response.push(RespValue::BulkString(entry.member));
            response.push(RespValue::BulkString(format_score(entry.score)));
        }
        RespValue::Array(response)
    });

    let deleted = xset.delete_range_by_rank(start, stop);
    state.add_dirty(deleted as u64);

    PruneResult { reply, deleted }
}
