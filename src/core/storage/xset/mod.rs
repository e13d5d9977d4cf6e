// src/core/storage/xset/mod.rs

//! The finite sorted set: an ordered map from unique byte-string members to
//! f64 scores, bounded by a per-set capacity (`finity`) and pruned from a
//! configurable end when the bound is exceeded.
//!
//! Two interchangeable encodings back the set. Small sets use the packed
//! byte buffer; a set whose cardinality or member length outgrows the
//! configured thresholds is upgraded to the skip-list-plus-hash-map
//! encoding and never downgraded.

pub mod indexed;
pub mod packed;
pub mod range;
pub mod skiplist;

use crate::core::FinityDBError;
use bytes::Bytes;
use indexed::IndexedSet;
use packed::PackedList;
use range::{LexRange, ScoreRange};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which end of the ordering is discarded when a set exceeds its capacity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Pruning {
    /// Discard the lowest (score, member) entries, keeping the top.
    #[default]
    #[serde(rename = "minscore")]
    #[strum(serialize = "minscore")]
    MinScore,
    /// Discard the highest entries, keeping the bottom.
    #[serde(rename = "maxscore")]
    #[strum(serialize = "maxscore")]
    MaxScore,
}

/// The packed-encoding thresholds, taken from the server configuration.
#[derive(Debug, Clone, Copy)]
pub struct PackedLimits {
    pub max_entries: usize,
    pub max_value: usize,
}

/// A single (member, score) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct XSetEntry {
    pub member: Bytes,
    pub score: f64,
}

/// Outcome of a single score/member application within XADD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UpsertOutcome {
    /// The member was absent and has been inserted with this score.
    Added(f64),
    /// The member existed and its score changed to this value.
    Updated(f64),
    /// The member existed with exactly this score already.
    Unchanged(f64),
    /// NX/XX made the pair a no-op.
    Skipped,
}

/// Per-pair conditions for [`XSet::upsert`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UpsertPolicy {
    /// Only insert new members.
    pub nx: bool,
    /// Only touch existing members.
    pub xx: bool,
    /// Add the score to the current one instead of replacing it.
    pub incr: bool,
}

#[derive(Debug, Clone)]
enum Backing {
    Packed(PackedList),
    Indexed(IndexedSet),
}

/// The finite sorted set value.
#[derive(Debug, Clone)]
pub struct XSet {
    backing: Backing,
    finity: u64,
    pruning: Pruning,
}

impl XSet {
    /// Creates an empty set, choosing the initial encoding from the first
    /// member about to be inserted: the packed encoding is skipped when it
    /// is disabled outright or the member is already too long for it.
    pub fn for_first_member(
        first_member_len: usize,
        finity: u64,
        pruning: Pruning,
        limits: &PackedLimits,
    ) -> Self {
        if limits.max_entries == 0 || first_member_len > limits.max_value {
            Self::new_indexed(finity, pruning)
        } else {
            Self::new_packed(finity, pruning)
        }
    }

    pub fn new_packed(finity: u64, pruning: Pruning) -> Self {
        Self {
            backing: Backing::Packed(PackedList::new()),
            finity,
            pruning,
        }
    }

    pub fn new_indexed(finity: u64, pruning: Pruning) -> Self {
        Self {
            backing: Backing::Indexed(IndexedSet::new()),
            finity,
            pruning,
        }
    }

    pub fn len(&self) -> usize {
        match &self.backing {
            Backing::Packed(list) => list.len(),
            Backing::Indexed(set) => set.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn finity(&self) -> u64 {
        self.finity
    }

    pub fn set_finity(&mut self, finity: u64) {
        self.finity = finity;
    }

    pub fn pruning(&self) -> Pruning {
        self.pruning
    }

    pub fn set_pruning(&mut self, pruning: Pruning) {
        self.pruning = pruning;
    }

    /// Whether the set currently uses the packed encoding.
    pub fn is_packed(&self) -> bool {
        matches!(self.backing, Backing::Packed(_))
    }

    pub fn encoding_name(&self) -> &'static str {
        match &self.backing {
            Backing::Packed(_) => "packed",
            Backing::Indexed(_) => "indexed",
        }
    }

    pub fn score_of(&self, member: &[u8]) -> Option<f64> {
        match &self.backing {
            Backing::Packed(list) => list.score_of(member),
            Backing::Indexed(set) => set.score_of(member),
        }
    }

    pub fn contains(&self, member: &[u8]) -> bool {
        self.score_of(member).is_some()
    }

    /// 0-based rank of a member in the requested direction.
    pub fn rank_of(&self, member: &[u8], reverse: bool) -> Option<usize> {
        let forward = match &self.backing {
            Backing::Packed(list) => list.rank_of(member),
            Backing::Indexed(set) => set.rank_of(member),
        }?;
        if reverse {
            Some(self.len() - 1 - forward)
        } else {
            Some(forward)
        }
    }

    /// Applies one score/member pair under the given policy.
    ///
    /// An existing member whose score changes is removed and re-inserted so
    /// the (score, member) order always holds. INCR arithmetic that produces
    /// NaN fails before any mutation of the pair.
    pub fn upsert(
        &mut self,
        member: &Bytes,
        score: f64,
        policy: UpsertPolicy,
        limits: &PackedLimits,
    ) -> Result<UpsertOutcome, FinityDBError> {
        match self.score_of(member) {
            Some(current) => {
                if policy.nx {
                    return Ok(UpsertOutcome::Skipped);
                }
                let new_score = if policy.incr { current + score } else { score };
                if new_score.is_nan() {
                    return Err(FinityDBError::ScoreNaN);
                }
                if new_score == current {
                    return Ok(UpsertOutcome::Unchanged(current));
                }
                match &mut self.backing {
                    Backing::Packed(list) => {
                        list.remove(member);
                        list.insert(member, new_score);
                    }
                    Backing::Indexed(set) => set.update_score(member, new_score),
                }
                Ok(UpsertOutcome::Updated(new_score))
            }
            None => {
                if policy.xx {
                    return Ok(UpsertOutcome::Skipped);
                }
                let mut outgrown = false;
                match &mut self.backing {
                    Backing::Packed(list) => {
                        list.insert(member, score);
                        outgrown =
                            list.len() > limits.max_entries || member.len() > limits.max_value;
                    }
                    Backing::Indexed(set) => set.insert(member.clone(), score),
                }
                if outgrown {
                    self.convert_to_indexed();
                }
                Ok(UpsertOutcome::Added(score))
            }
        }
    }

    pub fn remove(&mut self, member: &[u8]) -> bool {
        match &mut self.backing {
            Backing::Packed(list) => list.remove(member).is_some(),
            Backing::Indexed(set) => set.remove(member).is_some(),
        }
    }

    /// Rank-window enumeration with the command-level index conventions:
    /// negative indexes count from the end, and the window is clamped.
    pub fn range_by_rank(&self, start: i64, stop: i64, reverse: bool) -> Vec<XSetEntry> {
        let Some((start, stop)) = self.normalize_rank_window(start, stop) else {
            return Vec::new();
        };
        let mut entries = match &self.backing {
            Backing::Packed(list) => {
                if reverse {
                    let len = list.len();
                    list.entries_in_rank_window(len - 1 - stop, len - 1 - start)
                } else {
                    list.entries_in_rank_window(start, stop)
                }
            }
            Backing::Indexed(set) => {
                if reverse {
                    let len = set.len();
                    set.entries_in_rank_window(len - 1 - stop, len - 1 - start)
                } else {
                    set.entries_in_rank_window(start, stop)
                }
            }
        };
        if reverse {
            entries.reverse();
        }
        entries
    }

    /// Normalizes a possibly negative rank window against the current
    /// cardinality. `None` means the window is empty.
    pub fn normalize_rank_window(&self, start: i64, stop: i64) -> Option<(usize, usize)> {
        let len = self.len() as i64;
        if len == 0 {
            return None;
        }
        let mut start = if start < 0 { len + start } else { start };
        let mut stop = if stop < 0 { len + stop } else { stop };
        if start < 0 {
            start = 0;
        }
        if start > stop || start >= len {
            return None;
        }
        if stop >= len {
            stop = len - 1;
        }
        Some((start as usize, stop as usize))
    }

    pub fn range_by_score(
        &self,
        range: &ScoreRange,
        reverse: bool,
        offset: i64,
        limit: i64,
    ) -> Vec<XSetEntry> {
        match &self.backing {
            Backing::Packed(list) => list.range_by_score(range, reverse, offset, limit),
            Backing::Indexed(set) => set.range_by_score(range, reverse, offset, limit),
        }
    }

    pub fn range_by_lex(
        &self,
        range: &LexRange,
        reverse: bool,
        offset: i64,
        limit: i64,
    ) -> Vec<XSetEntry> {
        match &self.backing {
            Backing::Packed(list) => list.range_by_lex(range, reverse, offset, limit),
            Backing::Indexed(set) => set.range_by_lex(range, reverse, offset, limit),
        }
    }

    pub fn count_by_score(&self, range: &ScoreRange) -> usize {
        match &self.backing {
            Backing::Packed(list) => list.count_by_score(range),
            Backing::Indexed(set) => set.count_by_score(range),
        }
    }

    pub fn count_by_lex(&self, range: &LexRange) -> usize {
        match &self.backing {
            Backing::Packed(list) => list.count_by_lex(range),
            Backing::Indexed(set) => set.count_by_lex(range),
        }
    }

    /// Collects the entries in an already valid inclusive 0-based window.
    pub fn entries_in_rank_window(&self, start: usize, stop: usize) -> Vec<XSetEntry> {
        match &self.backing {
            Backing::Packed(list) => list.entries_in_rank_window(start, stop),
            Backing::Indexed(set) => set.entries_in_rank_window(start, stop),
        }
    }

    /// Deletes an already valid inclusive 0-based rank window.
    pub fn delete_range_by_rank(&mut self, start: usize, stop: usize) -> usize {
        match &mut self.backing {
            Backing::Packed(list) => list.delete_range_by_rank(start, stop),
            Backing::Indexed(set) => set.delete_range_by_rank(start, stop),
        }
    }

    pub fn delete_range_by_score(&mut self, range: &ScoreRange) -> usize {
        match &mut self.backing {
            Backing::Packed(list) => list.delete_range_by_score(range),
            Backing::Indexed(set) => set.delete_range_by_score(range),
        }
    }

    pub fn delete_range_by_lex(&mut self, range: &LexRange) -> usize {
        match &mut self.backing {
            Backing::Packed(list) => list.delete_range_by_lex(range),
            Backing::Indexed(set) => set.delete_range_by_lex(range),
        }
    }

    /// Iterates entries in (score, member) order regardless of encoding.
    pub fn iter_entries(&self) -> impl Iterator<Item = XSetEntry> + '_ {
        let packed = match &self.backing {
            Backing::Packed(list) => Some(list.iter()),
            Backing::Indexed(_) => None,
        };
        let indexed = match &self.backing {
            Backing::Indexed(set) => Some(set.iter()),
            Backing::Packed(_) => None,
        };
        packed
            .into_iter()
            .flatten()
            .map(|(member, score)| XSetEntry {
                member: Bytes::copy_from_slice(member),
                score,
            })
            .chain(
                indexed
                    .into_iter()
                    .flatten()
                    .map(|(member, score)| XSetEntry {
                        member: member.clone(),
                        score,
                    }),
            )
    }

    /// Rebuilds the set in the indexed encoding and swaps it in. A one-way
    /// transition: the packed encoding is never restored.
    fn convert_to_indexed(&mut self) {
        let Backing::Packed(list) = &self.backing else {
            return;
        };
        let mut set = IndexedSet::with_capacity(list.len());
        for (member, score) in list.iter() {
            set.insert(Bytes::copy_from_slice(member), score);
        }
        self.backing = Backing::Indexed(set);
    }

    pub fn memory_usage(&self) -> usize {
        match &self.backing {
            Backing::Packed(list) => list.memory_usage(),
            Backing::Indexed(set) => set.memory_usage(),
        }
    }
}
