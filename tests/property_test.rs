// tests/property_test.rs

//! Property-based tests driving random operation sequences against a
//! reference model, checking the structural invariants of the finite
//! sorted set.

use bytes::Bytes;
use finitydb::core::storage::xset::range::ScoreRange;
use finitydb::core::storage::xset::{PackedLimits, Pruning, UpsertPolicy, XSet};
use proptest::prelude::*;
use std::collections::BTreeMap;

/// Thresholds small enough that generated sequences cross the encoding
/// upgrade regularly.
const LIMITS: PackedLimits = PackedLimits {
    max_entries: 6,
    max_value: 12,
};

#[derive(Debug, Clone)]
enum Op {
    Upsert(u8, i8),
    Remove(u8),
    DeleteScoreRange(i8, i8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..16, -8i8..8).prop_map(|(m, s)| Op::Upsert(m, s)),
        (0u8..16).prop_map(Op::Remove),
        (-8i8..8, -8i8..8).prop_map(|(a, b)| Op::DeleteScoreRange(a.min(b), a.max(b))),
    ]
}

fn member(id: u8) -> Bytes {
    Bytes::from(format!("member-{id}"))
}

/// The reference: member -> score, with ordering derived on demand.
fn reference_order(model: &BTreeMap<Bytes, f64>) -> Vec<(Bytes, f64)> {
    let mut entries: Vec<(Bytes, f64)> = model
        .iter()
        .map(|(m, s)| (m.clone(), *s))
        .collect();
    entries.sort_by(|a, b| {
        a.1.partial_cmp(&b.1)
            .unwrap()
            .then_with(|| a.0.cmp(&b.0))
    });
    entries
}

proptest! {
    #[test]
    fn random_ops_match_reference_model(ops in proptest::collection::vec(op_strategy(), 1..120)) {
        let mut xset = XSet::for_first_member(8, u64::MAX, Pruning::MinScore, &LIMITS);
        let mut model: BTreeMap<Bytes, f64> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Upsert(id, score) => {
                    let m = member(id);
                    let score = score as f64;
                    xset.upsert(&m, score, UpsertPolicy::default(), &LIMITS).unwrap();
                    model.insert(m, score);
                }
                Op::Remove(id) => {
                    let m = member(id);
                    prop_assert_eq!(xset.remove(&m), model.remove(&m).is_some());
                }
                Op::DeleteScoreRange(lo, hi) => {
                    let range = ScoreRange {
                        min: lo as f64,
                        max: hi as f64,
                        minex: false,
                        maxex: false,
                    };
                    let expected = model
                        .iter()
                        .filter(|(_, s)| range.contains(**s))
                        .map(|(m, _)| m.clone())
                        .collect::<Vec<_>>();
                    for m in &expected {
                        model.remove(m);
                    }
                    prop_assert_eq!(xset.delete_range_by_score(&range), expected.len());
                }
            }

            // Cardinality always agrees.
            prop_assert_eq!(xset.len(), model.len());
        }

        // Enumeration respects the (score, member) order of the reference.
        let expected = reference_order(&model);
        let actual: Vec<(Bytes, f64)> = xset
            .iter_entries()
            .map(|e| (e.member, e.score))
            .collect();
        prop_assert_eq!(actual, expected.clone());

        // Ranks, scores and the rank/revrank relation hold for every member.
        for (rank, (m, s)) in expected.iter().enumerate() {
            prop_assert_eq!(xset.score_of(m), Some(*s));
            prop_assert_eq!(xset.rank_of(m, false), Some(rank));
            let rev = xset.rank_of(m, true).unwrap();
            prop_assert_eq!(rank + rev, xset.len() - 1);
        }

        // Score-range counts agree with a linear filter of the reference.
        let probe = ScoreRange::parse("(-4", "5").unwrap();
        let expected_count = expected.iter().filter(|(_, s)| probe.contains(*s)).count();
        prop_assert_eq!(xset.count_by_score(&probe), expected_count);
    }

    #[test]
    fn capacity_bound_holds_after_every_write(
        scores in proptest::collection::vec(-50i8..50, 1..60),
        finity in 1u64..8,
        maxscore in proptest::bool::ANY,
    ) {
        let pruning = if maxscore { Pruning::MaxScore } else { Pruning::MinScore };
        let mut xset = XSet::for_first_member(8, finity, pruning, &LIMITS);

        for (i, score) in scores.iter().enumerate() {
            let m = member((i % 32) as u8);
            xset.upsert(&m, *score as f64, UpsertPolicy::default(), &LIMITS).unwrap();

            // The enforcer step every write path runs.
            let len = xset.len() as u64;
            if len > finity {
                let (start, stop) = match pruning {
                    Pruning::MaxScore => (finity as usize, len as usize - 1),
                    Pruning::MinScore => (0, (len - finity) as usize - 1),
                };
                xset.delete_range_by_rank(start, stop);
            }
            prop_assert!(xset.len() as u64 <= finity);
        }

        // Surviving entries are the extreme end the pruning keeps.
        let entries = xset.range_by_rank(0, -1, false);
        for window in entries.windows(2) {
            prop_assert!(
                (window[0].score, window[0].member.as_ref())
                    <= (window[1].score, window[1].member.as_ref())
            );
        }
    }
}
