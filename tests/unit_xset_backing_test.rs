// tests/unit_xset_backing_test.rs

//! Encoding lifecycle: small sets stay packed, outgrowing either threshold
//! upgrades to the indexed encoding, and the upgrade is one-way with no
//! observable change in query results.

mod common;

use bytes::Bytes;
use common::{flat, setup_with};
use finitydb::core::RespValue;
use finitydb::core::storage::xset::range::ScoreRange;
use finitydb::core::storage::xset::{PackedLimits, Pruning, UpsertPolicy, XSet, XSetEntry};

const LIMITS: PackedLimits = PackedLimits {
    max_entries: 8,
    max_value: 16,
};

fn member(i: usize) -> Bytes {
    Bytes::from(format!("m{i:03}"))
}

fn fill(xset: &mut XSet, count: usize) {
    for i in 0..count {
        xset.upsert(&member(i), i as f64, UpsertPolicy::default(), &LIMITS)
            .unwrap();
    }
}

fn snapshot(xset: &XSet) -> Vec<XSetEntry> {
    xset.range_by_rank(0, -1, false)
}

#[test]
fn stays_packed_within_thresholds() {
    let mut xset = XSet::for_first_member(4, 100, Pruning::MinScore, &LIMITS);
    fill(&mut xset, 8);
    assert!(xset.is_packed());
    assert_eq!(xset.encoding_name(), "packed");
}

#[test]
fn upgrades_when_cardinality_exceeds_threshold() {
    let mut xset = XSet::for_first_member(4, 100, Pruning::MinScore, &LIMITS);
    fill(&mut xset, 8);
    let before = snapshot(&xset);

    xset.upsert(&member(8), 8.0, UpsertPolicy::default(), &LIMITS)
        .unwrap();
    assert!(!xset.is_packed());
    assert_eq!(xset.encoding_name(), "indexed");

    // Everything that was there before is still there, in the same order.
    let after = snapshot(&xset);
    assert_eq!(&after[..8], &before[..]);
    assert_eq!(after.len(), 9);
}

#[test]
fn upgrades_when_member_is_too_long() {
    let mut xset = XSet::for_first_member(4, 100, Pruning::MinScore, &LIMITS);
    fill(&mut xset, 2);
    assert!(xset.is_packed());

    let long = Bytes::from("a-member-longer-than-sixteen-bytes");
    xset.upsert(&long, 1.5, UpsertPolicy::default(), &LIMITS)
        .unwrap();
    assert!(!xset.is_packed());
    assert_eq!(xset.score_of(&long), Some(1.5));
}

#[test]
fn first_member_chooses_initial_encoding() {
    let xset = XSet::for_first_member(64, 100, Pruning::MinScore, &LIMITS);
    assert!(!xset.is_packed());

    let disabled = PackedLimits {
        max_entries: 0,
        max_value: 16,
    };
    let xset = XSet::for_first_member(1, 100, Pruning::MinScore, &disabled);
    assert!(!xset.is_packed());
}

#[test]
fn no_downgrade_after_shrinking() {
    let mut xset = XSet::for_first_member(4, 100, Pruning::MinScore, &LIMITS);
    fill(&mut xset, 9);
    assert!(!xset.is_packed());

    for i in 0..8 {
        xset.remove(&member(i));
    }
    assert_eq!(xset.len(), 1);
    assert!(!xset.is_packed());
}

#[test]
fn both_encodings_answer_queries_identically() {
    let mut packed = XSet::for_first_member(4, 100, Pruning::MinScore, &LIMITS);
    let roomy = PackedLimits {
        max_entries: 1024,
        max_value: 1024,
    };
    let mut indexed = XSet::new_indexed(100, Pruning::MinScore);

    // Interleave inserts, updates and removals on both encodings.
    for i in 0..8 {
        let m = member(i);
        let score = (i % 3) as f64;
        packed.upsert(&m, score, UpsertPolicy::default(), &roomy).unwrap();
        indexed
            .upsert(&m, score, UpsertPolicy::default(), &roomy)
            .unwrap();
    }
    packed
        .upsert(&member(2), 9.0, UpsertPolicy::default(), &roomy)
        .unwrap();
    indexed
        .upsert(&member(2), 9.0, UpsertPolicy::default(), &roomy)
        .unwrap();
    packed.remove(&member(5));
    indexed.remove(&member(5));

    assert!(packed.is_packed());
    assert!(!indexed.is_packed());
    assert_eq!(snapshot(&packed), snapshot(&indexed));

    let range = ScoreRange::parse("(0", "2").unwrap();
    assert_eq!(
        packed.range_by_score(&range, false, 0, -1),
        indexed.range_by_score(&range, false, 0, -1)
    );
    assert_eq!(
        packed.range_by_score(&range, true, 1, 2),
        indexed.range_by_score(&range, true, 1, 2)
    );
    assert_eq!(packed.count_by_score(&range), indexed.count_by_score(&range));
    for i in 0..8 {
        assert_eq!(
            packed.rank_of(&member(i), false),
            indexed.rank_of(&member(i), false)
        );
        assert_eq!(packed.score_of(&member(i)), indexed.score_of(&member(i)));
    }
}

#[tokio::test]
async fn command_results_survive_the_upgrade() {
    // Tiny thresholds so the switch happens mid-command-stream.
    let server = setup_with(|config| {
        config.xset_max_packed_entries = 3;
        config.xset_max_packed_value = 8;
    });
    server.run("XADD k 1 a 2 b 3 c").await.unwrap();
    assert_eq!(
        server.run("XRANGE k 0 -1").await.unwrap(),
        flat(&["a", "b", "c"])
    );

    server.run("XADD k 4 d").await.unwrap();
    assert_eq!(
        server.run("XRANGE k 0 -1 WITHSCORES").await.unwrap(),
        flat(&["a", "1", "b", "2", "c", "3", "d", "4"])
    );
    assert_eq!(
        server.run("XRANK k d").await.unwrap(),
        RespValue::Integer(3)
    );
    assert_eq!(
        server.run("XCOUNT k 2 +inf").await.unwrap(),
        RespValue::Integer(3)
    );
}
