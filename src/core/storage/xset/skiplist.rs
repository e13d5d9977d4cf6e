// src/core/storage/xset/skiplist.rs

//! A probabilistic skip list over (score, member) pairs.
//!
//! Nodes live in an index-addressed arena (a `Vec` with a free list), so
//! forward and backward links are plain `usize` handles rather than owning
//! pointers. Each level link carries a span (the number of entries it
//! skips), which makes rank queries and rank-addressed lookups O(log n).

use super::range::{LexRange, ScoreRange};
use bytes::Bytes;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;

const SKIPLIST_MAXLEVEL: usize = 32;
const SKIPLIST_P: f64 = 0.25;

/// Arena slot of the header node.
const HEAD: usize = 0;

#[derive(Debug, Clone)]
struct Level {
    forward: Option<usize>,
    /// Number of entries this link skips, counting the destination.
    span: usize,
}

#[derive(Debug, Clone)]
struct Node {
    member: Bytes,
    score: f64,
    levels: Vec<Level>,
    backward: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct SkipList {
    /// All nodes; slot 0 is the header sentinel.
    nodes: Vec<Option<Node>>,
    free_slots: Vec<usize>,
    tail: Option<usize>,
    level: usize,
    length: usize,
    rng: SmallRng,
}

/// Orders entries by score first, then byte-lexicographically by member.
#[inline]
fn cmp_entry(score_a: f64, member_a: &[u8], score_b: f64, member_b: &[u8]) -> Ordering {
    score_a
        .partial_cmp(&score_b)
        .unwrap_or(Ordering::Equal)
        .then_with(|| member_a.cmp(member_b))
}

impl SkipList {
    pub fn new() -> Self {
        let header = Node {
            member: Bytes::new(),
            score: 0.0,
            levels: (0..SKIPLIST_MAXLEVEL)
                .map(|_| Level {
                    forward: None,
                    span: 0,
                })
                .collect(),
            backward: None,
        };
        Self {
            nodes: vec![Some(header)],
            free_slots: Vec::new(),
            tail: None,
            level: 1,
            length: 0,
            rng: SmallRng::from_entropy(),
        }
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    fn node(&self, idx: usize) -> &Node {
        self.nodes[idx].as_ref().expect("skip list arena slot is live")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node {
        self.nodes[idx].as_mut().expect("skip list arena slot is live")
    }

    /// The (member, score) entry stored at an arena handle.
    pub fn entry(&self, idx: usize) -> (&Bytes, f64) {
        let node = self.node(idx);
        (&node.member, node.score)
    }

    /// Level-0 successor of a node.
    pub fn next(&self, idx: usize) -> Option<usize> {
        self.node(idx).levels[0].forward
    }

    /// Level-0 predecessor of a node; `None` at the first entry.
    pub fn prev(&self, idx: usize) -> Option<usize> {
        self.node(idx).backward
    }

    pub fn first(&self) -> Option<usize> {
        self.node(HEAD).levels[0].forward
    }

    pub fn last(&self) -> Option<usize> {
        self.tail
    }

    fn random_level(&mut self) -> usize {
        let mut level = 1;
        while level < SKIPLIST_MAXLEVEL && self.rng.r#gen::<f64>() < SKIPLIST_P {
            level += 1;
        }
        level
    }

    fn alloc_node(&mut self, member: Bytes, score: f64, level: usize) -> usize {
        let node = Node {
            member,
            score,
            levels: (0..level)
                .map(|_| Level {
                    forward: None,
                    span: 0,
                })
                .collect(),
            backward: None,
        };
        if let Some(idx) = self.free_slots.pop() {
            self.nodes[idx] = Some(node);
            idx
        } else {
            let idx = self.nodes.len();
            self.nodes.push(Some(node));
            idx
        }
    }

    fn free_node(&mut self, idx: usize) {
        self.nodes[idx] = None;
        self.free_slots.push(idx);
    }

    /// Inserts a new entry. The caller guarantees the member is not already
    /// present (uniqueness is enforced by the accompanying hash map).
    pub fn insert(&mut self, member: Bytes, score: f64) {
        let mut update = [HEAD; SKIPLIST_MAXLEVEL];
        let mut rank = [0usize; SKIPLIST_MAXLEVEL];

        let mut x = HEAD;
        for i in (0..self.level).rev() {
            rank[i] = if i == self.level - 1 { 0 } else { rank[i + 1] };
            while let Some(fwd) = self.node(x).levels[i].forward {
                let fwd_node = self.node(fwd);
                if cmp_entry(fwd_node.score, &fwd_node.member, score, &member) == Ordering::Less {
                    rank[i] += self.node(x).levels[i].span;
                    x = fwd;
                } else {
                    break;
                }
            }
            update[i] = x;
        }

        let level = self.random_level();
        if level > self.level {
            for i in self.level..level {
                rank[i] = 0;
                update[i] = HEAD;
                self.node_mut(HEAD).levels[i].span = self.length;
            }
            self.level = level;
        }

        let new_idx = self.alloc_node(member, score, level);
        for i in 0..level {
            let pred = update[i];
            let pred_forward = self.node(pred).levels[i].forward;
            let pred_span = self.node(pred).levels[i].span;

            let new_node = self.node_mut(new_idx);
            new_node.levels[i].forward = pred_forward;
            new_node.levels[i].span = pred_span - (rank[0] - rank[i]);

            let pred_node = self.node_mut(pred);
            pred_node.levels[i].forward = Some(new_idx);
            pred_node.levels[i].span = (rank[0] - rank[i]) + 1;
        }
        for i in level..self.level {
            self.node_mut(update[i]).levels[i].span += 1;
        }

        self.node_mut(new_idx).backward = if update[0] == HEAD {
            None
        } else {
            Some(update[0])
        };
        match self.node(new_idx).levels[0].forward {
            Some(fwd) => self.node_mut(fwd).backward = Some(new_idx),
            None => self.tail = Some(new_idx),
        }

        self.length += 1;
    }

    /// Removes the entry with this exact (member, score) pair. Returns
    /// whether it was found.
    pub fn remove(&mut self, member: &[u8], score: f64) -> bool {
        let mut update = [HEAD; SKIPLIST_MAXLEVEL];

        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(fwd) = self.node(x).levels[i].forward {
                let fwd_node = self.node(fwd);
                if cmp_entry(fwd_node.score, &fwd_node.member, score, member) == Ordering::Less {
                    x = fwd;
                } else {
                    break;
                }
            }
            update[i] = x;
        }

        if let Some(target) = self.node(x).levels[0].forward {
            let node = self.node(target);
            if node.score == score && node.member.as_ref() == member {
                self.delete_node(target, &update);
                return true;
            }
        }
        false
    }

    fn delete_node(&mut self, idx: usize, update: &[usize; SKIPLIST_MAXLEVEL]) {
        for i in 0..self.level {
            let pred = update[i];
            if self.node(pred).levels[i].forward == Some(idx) {
                let removed_span = self.node(idx).levels[i].span;
                let removed_forward = self.node(idx).levels[i].forward;
                let pred_node = self.node_mut(pred);
                pred_node.levels[i].span = pred_node.levels[i].span + removed_span - 1;
                pred_node.levels[i].forward = removed_forward;
            } else {
                self.node_mut(pred).levels[i].span -= 1;
            }
        }

        match self.node(idx).levels[0].forward {
            Some(fwd) => {
                let backward = self.node(idx).backward;
                self.node_mut(fwd).backward = backward;
            }
            None => self.tail = self.node(idx).backward,
        }

        while self.level > 1 && self.node(HEAD).levels[self.level - 1].forward.is_none() {
            self.level -= 1;
        }

        self.free_node(idx);
        self.length -= 1;
    }

    /// 0-based rank of the exact (member, score) entry.
    pub fn rank_of(&self, member: &[u8], score: f64) -> Option<usize> {
        let mut rank = 0usize;
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(fwd) = self.node(x).levels[i].forward {
                let fwd_node = self.node(fwd);
                if cmp_entry(fwd_node.score, &fwd_node.member, score, member) != Ordering::Greater {
                    rank += self.node(x).levels[i].span;
                    x = fwd;
                } else {
                    break;
                }
            }
        }
        if x != HEAD {
            let node = self.node(x);
            if node.score == score && node.member.as_ref() == member {
                return Some(rank - 1);
            }
        }
        None
    }

    /// Arena handle of the entry at a 0-based rank.
    pub fn node_at_rank(&self, rank: usize) -> Option<usize> {
        if rank >= self.length {
            return None;
        }
        let target = rank + 1;
        let mut traversed = 0usize;
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(fwd) = self.node(x).levels[i].forward {
                if traversed + self.node(x).levels[i].span <= target {
                    traversed += self.node(x).levels[i].span;
                    x = fwd;
                } else {
                    break;
                }
                if traversed == target {
                    return Some(x);
                }
            }
        }
        None
    }

    /// Handle of the first entry whose score satisfies the range, if any.
    pub fn first_in_score_range(&self, range: &ScoreRange) -> Option<usize> {
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(fwd) = self.node(x).levels[i].forward {
                if !range.gte_min(self.node(fwd).score) {
                    x = fwd;
                } else {
                    break;
                }
            }
        }
        let candidate = self.node(x).levels[0].forward?;
        range.lte_max(self.node(candidate).score).then_some(candidate)
    }

    /// Handle of the last entry whose score satisfies the range, if any.
    pub fn last_in_score_range(&self, range: &ScoreRange) -> Option<usize> {
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(fwd) = self.node(x).levels[i].forward {
                if range.lte_max(self.node(fwd).score) {
                    x = fwd;
                } else {
                    break;
                }
            }
        }
        if x == HEAD {
            return None;
        }
        range.gte_min(self.node(x).score).then_some(x)
    }

    /// Handle of the first entry whose member satisfies the lex range.
    /// Meaningful when all entries share one score, as lex commands assume.
    pub fn first_in_lex_range(&self, range: &LexRange) -> Option<usize> {
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(fwd) = self.node(x).levels[i].forward {
                if !range.gte_min(&self.node(fwd).member) {
                    x = fwd;
                } else {
                    break;
                }
            }
        }
        let candidate = self.node(x).levels[0].forward?;
        range.lte_max(&self.node(candidate).member).then_some(candidate)
    }

    /// Handle of the last entry whose member satisfies the lex range.
    pub fn last_in_lex_range(&self, range: &LexRange) -> Option<usize> {
        let mut x = HEAD;
        for i in (0..self.level).rev() {
            while let Some(fwd) = self.node(x).levels[i].forward {
                if range.lte_max(&self.node(fwd).member) {
                    x = fwd;
                } else {
                    break;
                }
            }
        }
        if x == HEAD {
            return None;
        }
        range.gte_min(&self.node(x).member).then_some(x)
    }

    /// Iterates all entries in (score, member) order.
    pub fn iter(&self) -> SkipListIter<'_> {
        SkipListIter {
            list: self,
            current: self.first(),
        }
    }
}

impl Default for SkipList {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SkipListIter<'a> {
    list: &'a SkipList,
    current: Option<usize>,
}

impl<'a> Iterator for SkipListIter<'a> {
    type Item = (&'a Bytes, f64);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let node = self.list.nodes[idx].as_ref().expect("skip list arena slot is live");
        self.current = node.levels[0].forward;
        Some((&node.member, node.score))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(s: &str) -> Bytes {
        Bytes::copy_from_slice(s.as_bytes())
    }

    fn filled() -> SkipList {
        let mut list = SkipList::new();
        list.insert(b("dave"), 50.0);
        list.insert(b("alice"), 100.0);
        list.insert(b("charlie"), 150.0);
        list.insert(b("bob"), 200.0);
        list
    }

    #[test]
    fn insert_keeps_score_member_order() {
        let list = filled();
        let members: Vec<_> = list.iter().map(|(m, _)| m.clone()).collect();
        assert_eq!(members, vec![b("dave"), b("alice"), b("charlie"), b("bob")]);
    }

    #[test]
    fn equal_scores_order_lexicographically() {
        let mut list = SkipList::new();
        list.insert(b("zebra"), 1.0);
        list.insert(b("apple"), 1.0);
        list.insert(b("mango"), 1.0);
        let members: Vec<_> = list.iter().map(|(m, _)| m.clone()).collect();
        assert_eq!(members, vec![b("apple"), b("mango"), b("zebra")]);
    }

    #[test]
    fn rank_roundtrip() {
        let list = filled();
        for (rank, (member, score)) in list.iter().enumerate().collect::<Vec<_>>() {
            assert_eq!(list.rank_of(member, score), Some(rank));
            let idx = list.node_at_rank(rank).unwrap();
            assert_eq!(list.entry(idx).0, member);
        }
        assert_eq!(list.rank_of(b"nobody".as_ref(), 1.0), None);
        assert!(list.node_at_rank(4).is_none());
    }

    #[test]
    fn remove_relinks_and_shrinks() {
        let mut list = filled();
        assert!(list.remove(b"charlie".as_ref(), 150.0));
        assert!(!list.remove(b"charlie".as_ref(), 150.0));
        // Removing with the wrong score must not match.
        assert!(!list.remove(b"bob".as_ref(), 1.0));
        assert_eq!(list.len(), 3);
        assert_eq!(list.rank_of(b"bob".as_ref(), 200.0), Some(2));
        let tail = list.last().unwrap();
        assert_eq!(list.entry(tail).0, &b("bob"));
    }

    #[test]
    fn score_range_boundaries() {
        let list = filled();
        let range = ScoreRange::parse("100", "150").unwrap();
        let first = list.first_in_score_range(&range).unwrap();
        let last = list.last_in_score_range(&range).unwrap();
        assert_eq!(list.entry(first).0, &b("alice"));
        assert_eq!(list.entry(last).0, &b("charlie"));

        let open = ScoreRange::parse("(100", "(150").unwrap();
        assert!(list.first_in_score_range(&open).is_none());

        let empty = ScoreRange::parse("300", "400").unwrap();
        assert!(list.first_in_score_range(&empty).is_none());
        assert!(list.last_in_score_range(&empty).is_none());
    }

    #[test]
    fn lex_range_boundaries() {
        let mut list = SkipList::new();
        for m in ["a", "b", "c", "d"] {
            list.insert(b(m), 0.0);
        }
        let range = LexRange::parse(b"[b", b"(d").unwrap();
        let first = list.first_in_lex_range(&range).unwrap();
        let last = list.last_in_lex_range(&range).unwrap();
        assert_eq!(list.entry(first).0, &b("b"));
        assert_eq!(list.entry(last).0, &b("c"));
    }

    #[test]
    fn backward_links_follow_removals() {
        let mut list = filled();
        list.remove(b"bob".as_ref(), 200.0);
        let mut current = list.last();
        let mut reversed = Vec::new();
        while let Some(idx) = current {
            reversed.push(list.entry(idx).0.clone());
            current = list.prev(idx);
        }
        assert_eq!(reversed, vec![b("charlie"), b("alice"), b("dave")]);
    }
}
