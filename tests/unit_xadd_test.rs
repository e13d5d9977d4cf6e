// tests/unit_xadd_test.rs

mod common;

use common::{bulk, flat, frame, setup};
use finitydb::core::FinityDBError;
use finitydb::core::RespValue;
use finitydb::core::commands::command_trait::ParseCommand;
use finitydb::core::commands::xset::XAdd;
use finitydb::core::events::EventKind;

#[tokio::test]
async fn test_xadd_parse_options_and_pairs() {
    let args = [
        frame("myset"),
        frame("NX"),
        frame("CH"),
        frame("FINITY"),
        frame("10"),
        frame("PRUNING"),
        frame("maxscore"),
        frame("1.5"),
        frame("alpha"),
    ];
    let cmd = XAdd::parse(&args).unwrap();
    assert!(cmd.nx);
    assert!(cmd.ch);
    assert!(!cmd.xx);
    assert_eq!(cmd.prune.modify_finity, Some(10));
    assert_eq!(cmd.pairs.len(), 1);
    assert_eq!(cmd.pairs[0].0, 1.5);
}

#[tokio::test]
async fn test_xadd_parse_nx_xx_conflict() {
    let args = [frame("k"), frame("NX"), frame("XX"), frame("1"), frame("a")];
    let err = XAdd::parse(&args).unwrap_err();
    assert!(err.to_string().contains("XX and NX options"));
}

#[tokio::test]
async fn test_xadd_parse_incr_single_pair_only() {
    let args = [
        frame("k"),
        frame("INCR"),
        frame("1"),
        frame("a"),
        frame("2"),
        frame("b"),
    ];
    let err = XAdd::parse(&args).unwrap_err();
    assert!(err.to_string().contains("INCR option supports a single"));
}

#[tokio::test]
async fn test_xadd_parse_odd_pair_count_is_syntax_error() {
    let args = [frame("k"), frame("1"), frame("a"), frame("2")];
    assert!(matches!(
        XAdd::parse(&args).unwrap_err(),
        FinityDBError::SyntaxError
    ));
}

#[tokio::test]
async fn test_xadd_parse_finity_validation() {
    let zero = [frame("k"), frame("FINITY"), frame("0"), frame("1"), frame("a")];
    assert!(matches!(
        XAdd::parse(&zero).unwrap_err(),
        FinityDBError::InvalidFinity
    ));

    let garbage = [
        frame("k"),
        frame("FINITY"),
        frame("lots"),
        frame("1"),
        frame("a"),
    ];
    assert!(matches!(
        XAdd::parse(&garbage).unwrap_err(),
        FinityDBError::FinityNotANumber
    ));
}

#[tokio::test]
async fn test_xadd_parse_bad_pruning_is_syntax_error() {
    let args = [
        frame("k"),
        frame("PRUNING"),
        frame("sideways"),
        frame("1"),
        frame("a"),
    ];
    assert!(matches!(
        XAdd::parse(&args).unwrap_err(),
        FinityDBError::SyntaxError
    ));
}

#[tokio::test]
async fn test_xadd_parse_nan_score_rejected() {
    let args = [frame("k"), frame("nan"), frame("a")];
    assert!(matches!(
        XAdd::parse(&args).unwrap_err(),
        FinityDBError::NotAFloat
    ));
}

#[tokio::test]
async fn test_xadd_basic_insert_and_score() {
    let server = setup();
    assert_eq!(
        server.run("XADD k 1 a 2 b").await.unwrap(),
        RespValue::Integer(2)
    );
    assert_eq!(server.run("XCARD k").await.unwrap(), RespValue::Integer(2));
    assert_eq!(server.run("XSCORE k a").await.unwrap(), bulk("1"));
}

#[tokio::test]
async fn test_xadd_reply_counts_added_not_updated() {
    let server = setup();
    server.run("XADD k 1 a 2 b").await.unwrap();
    // One update (a -> 5), one insert (c).
    assert_eq!(
        server.run("XADD k 5 a 3 c").await.unwrap(),
        RespValue::Integer(1)
    );
    // CH counts changed elements too.
    assert_eq!(
        server.run("XADD k CH 6 a 4 d").await.unwrap(),
        RespValue::Integer(2)
    );
}

#[tokio::test]
async fn test_xadd_nx_and_xx_semantics() {
    let server = setup();
    server.run("XADD k 1 a").await.unwrap();

    // NX on an existing member is a no-op.
    assert_eq!(
        server.run("XADD k NX 9 a").await.unwrap(),
        RespValue::Integer(0)
    );
    assert_eq!(server.run("XSCORE k a").await.unwrap(), bulk("1"));

    // XX on an absent member is a no-op.
    assert_eq!(
        server.run("XADD k XX 9 b").await.unwrap(),
        RespValue::Integer(0)
    );
    assert_eq!(server.run("XSCORE k b").await.unwrap(), RespValue::Null);

    // XX on a missing key creates nothing.
    assert_eq!(
        server.run("XADD other XX 1 a").await.unwrap(),
        RespValue::Integer(0)
    );
    assert_eq!(
        server.run("EXISTS other").await.unwrap(),
        RespValue::Integer(0)
    );
}

#[tokio::test]
async fn test_xadd_finity_prunes_low_end_by_default() {
    let server = setup();
    // Four inserts against a capacity of three: the lowest entry goes.
    assert_eq!(
        server
            .run("XADD k FINITY 3 PRUNING minscore 1 a 2 b 3 c 4 d")
            .await
            .unwrap(),
        RespValue::Integer(4)
    );
    assert_eq!(
        server.run("XRANGE k 0 -1 WITHSCORES").await.unwrap(),
        flat(&["b", "2", "c", "3", "d", "4"])
    );
    assert_eq!(server.run("XSCORE k a").await.unwrap(), RespValue::Null);
}

#[tokio::test]
async fn test_xadd_elements_reply_lists_evictees_in_order() {
    let server = setup();
    server
        .run("XADD k FINITY 3 PRUNING minscore 1 a 2 b 3 c 4 d")
        .await
        .unwrap();

    // Switch to maxscore pruning: the two highest entries are evicted and
    // reported (in ascending order) instead of the normal reply.
    assert_eq!(
        server
            .run("XADD k FINITY 3 PRUNING maxscore ELEMENTS 0.5 e 10 f")
            .await
            .unwrap(),
        flat(&["d", "4", "f", "10"])
    );
    assert_eq!(
        server.run("XRANGE k 0 -1 WITHSCORES").await.unwrap(),
        flat(&["e", "0.5", "b", "2", "c", "3"])
    );
}

#[tokio::test]
async fn test_xadd_elements_reply_empty_when_under_capacity() {
    let server = setup();
    assert_eq!(
        server.run("XADD k FINITY 10 ELEMENTS 1 a").await.unwrap(),
        RespValue::Array(vec![])
    );
}

#[tokio::test]
async fn test_xadd_capacity_default_comes_from_config() {
    let server = common::setup_with(|config| config.xset_finity = 2);
    server.run("XADD k 1 a 2 b 3 c").await.unwrap();
    assert_eq!(server.run("XCARD k").await.unwrap(), RespValue::Integer(2));
    assert_eq!(
        server.run("XGETFINITY k").await.unwrap(),
        RespValue::Integer(2)
    );
}

#[tokio::test]
async fn test_xadd_emits_keyspace_event() {
    let server = setup();
    let mut events = server.state.notifications.subscribe();
    server.run("XADD k 1 a").await.unwrap();
    let event = events.recv().await.unwrap();
    assert_eq!(event.kind, EventKind::XSet);
    assert_eq!(event.event, "xadd");
    assert_eq!(&event.key[..], b"k");

    // An XADD that changes nothing stays silent.
    server.run("XADD k 1 a").await.unwrap();
    server.run("XADD k CH 2 a").await.unwrap();
    let event = events.recv().await.unwrap();
    assert_eq!(event.event, "xadd");
    assert!(events.try_recv().is_err());
}
