// tests/unit_xrange_test.rs

mod common;

use common::{flat, frame, setup};
use finitydb::core::FinityDBError;
use finitydb::core::RespValue;
use finitydb::core::commands::command_trait::ParseCommand;
use finitydb::core::commands::xset::XRange;

async fn populated() -> common::TestServer {
    let server = setup();
    server.run("XADD k 1 a 2 b 3 c 4 d").await.unwrap();
    server
}

#[tokio::test]
async fn test_xrange_parse_rejects_trailing_garbage() {
    let args = [frame("k"), frame("0"), frame("-1"), frame("NOSCORES")];
    assert!(matches!(
        XRange::parse(&args).unwrap_err(),
        FinityDBError::SyntaxError
    ));
}

#[tokio::test]
async fn test_xrange_full_window() {
    let server = populated().await;
    assert_eq!(
        server.run("XRANGE k 0 -1").await.unwrap(),
        flat(&["a", "b", "c", "d"])
    );
    assert_eq!(
        server.run("XRANGE k 0 -1 WITHSCORES").await.unwrap(),
        flat(&["a", "1", "b", "2", "c", "3", "d", "4"])
    );
}

#[tokio::test]
async fn test_xrange_negative_indices() {
    let server = populated().await;
    assert_eq!(
        server.run("XRANGE k -2 -1").await.unwrap(),
        flat(&["c", "d"])
    );
    assert_eq!(server.run("XRANGE k -100 0").await.unwrap(), flat(&["a"]));
}

#[tokio::test]
async fn test_xrange_empty_windows() {
    let server = populated().await;
    assert_eq!(server.run("XRANGE k 2 1").await.unwrap(), flat(&[]));
    assert_eq!(server.run("XRANGE k 9 12").await.unwrap(), flat(&[]));
    assert_eq!(server.run("XRANGE missing 0 -1").await.unwrap(), flat(&[]));
}

#[tokio::test]
async fn test_xrange_clamps_stop() {
    let server = populated().await;
    assert_eq!(
        server.run("XRANGE k 2 100").await.unwrap(),
        flat(&["c", "d"])
    );
}

#[tokio::test]
async fn test_xrevrange_orders_high_to_low() {
    let server = populated().await;
    assert_eq!(
        server.run("XREVRANGE k 0 -1").await.unwrap(),
        flat(&["d", "c", "b", "a"])
    );
    assert_eq!(
        server.run("XREVRANGE k 0 1 WITHSCORES").await.unwrap(),
        flat(&["d", "4", "c", "3"])
    );
}

#[tokio::test]
async fn test_xrank_and_xrevrank_are_complementary() {
    let server = populated().await;
    assert_eq!(server.run("XRANK k c").await.unwrap(), RespValue::Integer(2));
    assert_eq!(
        server.run("XREVRANK k c").await.unwrap(),
        RespValue::Integer(1)
    );
    assert_eq!(server.run("XRANK k nope").await.unwrap(), RespValue::Null);
    assert_eq!(
        server.run("XRANK missing a").await.unwrap(),
        RespValue::Null
    );
}

#[tokio::test]
async fn test_equal_scores_rank_lexicographically() {
    let server = setup();
    server.run("XADD k 1 pear 1 apple 1 mango").await.unwrap();
    assert_eq!(
        server.run("XRANGE k 0 -1").await.unwrap(),
        flat(&["apple", "mango", "pear"])
    );
    assert_eq!(
        server.run("XRANK k apple").await.unwrap(),
        RespValue::Integer(0)
    );
}
