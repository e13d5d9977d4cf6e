// src/core/storage/xset/indexed.rs

//! The indexed encoding: a skip list ordered by (score, member) paired with
//! a member-to-score hash map for O(1) score lookups.
//!
//! Both structures hold the same `Bytes` member, so the underlying byte
//! storage is shared and released when the last of the two drops it.

use super::range::{LexRange, ScoreRange};
use super::skiplist::SkipList;
use super::XSetEntry;
use bytes::Bytes;
use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct IndexedSet {
    members: HashMap<Bytes, f64>,
    list: SkipList,
}

impl IndexedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: HashMap::with_capacity(capacity),
            list: SkipList::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn score_of(&self, member: &[u8]) -> Option<f64> {
        self.members.get(member).copied()
    }

    /// Inserts a member that is known to be absent.
    pub fn insert(&mut self, member: Bytes, score: f64) {
        let previous = self.members.insert(member.clone(), score);
        debug_assert!(previous.is_none(), "insert of an already present member");
        self.list.insert(member, score);
    }

    /// Moves an existing member to a new score. The entry is removed from
    /// the skip list and re-inserted so the (score, member) order holds.
    pub fn update_score(&mut self, member: &Bytes, new_score: f64) {
        let slot = self
            .members
            .get_mut(member)
            .expect("update_score of a missing member");
        let old_score = *slot;
        *slot = new_score;
        assert!(
            self.list.remove(member, old_score),
            "skip list lost a member the hash map still knows"
        );
        self.list.insert(member.clone(), new_score);
    }

    pub fn remove(&mut self, member: &[u8]) -> Option<f64> {
        let score = self.members.remove(member)?;
        assert!(
            self.list.remove(member, score),
            "skip list lost a member the hash map still knows"
        );
        Some(score)
    }

    /// 0-based forward rank of a member.
    pub fn rank_of(&self, member: &[u8]) -> Option<usize> {
        let score = self.score_of(member)?;
        self.list.rank_of(member, score)
    }

    /// Collects the entries in the inclusive 0-based rank window.
    pub fn entries_in_rank_window(&self, start: usize, stop: usize) -> Vec<XSetEntry> {
        let Some(mut idx) = self.list.node_at_rank(start) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(stop - start + 1);
        for _ in start..=stop {
            let (member, score) = self.list.entry(idx);
            out.push(XSetEntry {
                member: member.clone(),
                score,
            });
            match self.list.next(idx) {
                Some(next) => idx = next,
                None => break,
            }
        }
        out
    }

    /// Walks the score range in traversal order, honoring offset and limit.
    /// A negative limit means unlimited; a negative offset matches nothing.
    pub fn range_by_score(
        &self,
        range: &ScoreRange,
        reverse: bool,
        offset: i64,
        limit: i64,
    ) -> Vec<XSetEntry> {
        let start = if reverse {
            self.list.last_in_score_range(range)
        } else {
            self.list.first_in_score_range(range)
        };
        let Some(start) = start else {
            return Vec::new();
        };
        if offset < 0 {
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut current = Some(start);
        let mut to_skip = offset;
        let mut remaining = limit;
        while let Some(idx) = current {
            let (member, score) = self.list.entry(idx);
            let in_range = if reverse {
                range.gte_min(score)
            } else {
                range.lte_max(score)
            };
            if !in_range {
                break;
            }
            if to_skip > 0 {
                to_skip -= 1;
            } else {
                if remaining == 0 {
                    break;
                }
                remaining -= 1;
                out.push(XSetEntry {
                    member: member.clone(),
                    score,
                });
            }
            current = if reverse {
                self.list.prev(idx)
            } else {
                self.list.next(idx)
            };
        }
        out
    }

    /// Walks the lex range in traversal order, honoring offset and limit.
    pub fn range_by_lex(
        &self,
        range: &LexRange,
        reverse: bool,
        offset: i64,
        limit: i64,
    ) -> Vec<XSetEntry> {
        let start = if reverse {
            self.list.last_in_lex_range(range)
        } else {
            self.list.first_in_lex_range(range)
        };
        let Some(start) = start else {
            return Vec::new();
        };
        if offset < 0 {
            return Vec::new();
        }

        let mut out = Vec::new();
        let mut current = Some(start);
        let mut to_skip = offset;
        let mut remaining = limit;
        while let Some(idx) = current {
            let (member, score) = self.list.entry(idx);
            let in_range = if reverse {
                range.gte_min(member)
            } else {
                range.lte_max(member)
            };
            if !in_range {
                break;
            }
            if to_skip > 0 {
                to_skip -= 1;
            } else {
                if remaining == 0 {
                    break;
                }
                remaining -= 1;
                out.push(XSetEntry {
                    member: member.clone(),
                    score,
                });
            }
            current = if reverse {
                self.list.prev(idx)
            } else {
                self.list.next(idx)
            };
        }
        out
    }

    /// Counts the entries in a score range from the rank delta between the
    /// first and last entries in range, with no traversal.
    pub fn count_by_score(&self, range: &ScoreRange) -> usize {
        let Some(first) = self.list.first_in_score_range(range) else {
            return 0;
        };
        let (member, score) = self.list.entry(first);
        let first_rank = self
            .list
            .rank_of(member, score)
            .expect("entry in range has a rank");
        let mut count = self.list.len() - first_rank;
        if let Some(last) = self.list.last_in_score_range(range) {
            let (member, score) = self.list.entry(last);
            let last_rank = self
                .list
                .rank_of(member, score)
                .expect("entry in range has a rank");
            count -= self.list.len() - (last_rank + 1);
        }
        count
    }

    /// Counts the entries in a lex range the same way.
    pub fn count_by_lex(&self, range: &LexRange) -> usize {
        let Some(first) = self.list.first_in_lex_range(range) else {
            return 0;
        };
        let (member, score) = self.list.entry(first);
        let first_rank = self
            .list
            .rank_of(member, score)
            .expect("entry in range has a rank");
        let mut count = self.list.len() - first_rank;
        if let Some(last) = self.list.last_in_lex_range(range) {
            let (member, score) = self.list.entry(last);
            let last_rank = self
                .list
                .rank_of(member, score)
                .expect("entry in range has a rank");
            count -= self.list.len() - (last_rank + 1);
        }
        count
    }

    /// Deletes the inclusive 0-based rank window, returning how many entries
    /// were removed.
    pub fn delete_range_by_rank(&mut self, start: usize, stop: usize) -> usize {
        let doomed = self.entries_in_rank_window(start, stop);
        for entry in &doomed {
            self.remove(&entry.member);
        }
        doomed.len()
    }

    pub fn delete_range_by_score(&mut self, range: &ScoreRange) -> usize {
        let doomed = self.range_by_score(range, false, 0, -1);
        for entry in &doomed {
            self.remove(&entry.member);
        }
        doomed.len()
    }

    pub fn delete_range_by_lex(&mut self, range: &LexRange) -> usize {
        let doomed = self.range_by_lex(range, false, 0, -1);
        for entry in &doomed {
            self.remove(&entry.member);
        }
        doomed.len()
    }

    /// Iterates entries in (score, member) order.
    pub fn iter(&self) -> impl Iterator<Item = (&Bytes, f64)> + '_ {
        self.list.iter()
    }

    pub fn memory_usage(&self) -> usize {
        let f64_size = std::mem::size_of::<f64>();
        self.members
            .keys()
            .map(|member| member.len() + f64_size)
            .sum()
    }
}
