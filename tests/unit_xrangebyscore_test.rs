// tests/unit_xrangebyscore_test.rs

mod common;

use common::{flat, setup};
use finitydb::core::RespValue;

async fn populated() -> common::TestServer {
    let server = setup();
    server.run("XADD k 1 a 2 b 3 c 4 d").await.unwrap();
    server
}

#[tokio::test]
async fn test_xrangebyscore_closed_and_open_bounds() {
    let server = populated().await;
    assert_eq!(
        server.run("XRANGEBYSCORE k 2 3").await.unwrap(),
        flat(&["b", "c"])
    );
    assert_eq!(
        server.run("XRANGEBYSCORE k (2 3").await.unwrap(),
        flat(&["c"])
    );
    assert_eq!(
        server.run("XRANGEBYSCORE k (2 (3").await.unwrap(),
        flat(&[])
    );
}

#[tokio::test]
async fn test_xrangebyscore_infinities() {
    let server = populated().await;
    assert_eq!(
        server.run("XRANGEBYSCORE k -inf +inf").await.unwrap(),
        flat(&["a", "b", "c", "d"])
    );
    assert_eq!(
        server.run("XRANGEBYSCORE k 3 +inf WITHSCORES").await.unwrap(),
        flat(&["c", "3", "d", "4"])
    );
}

#[tokio::test]
async fn test_xrangebyscore_limit() {
    let server = populated().await;
    assert_eq!(
        server.run("XRANGEBYSCORE k -inf +inf LIMIT 1 2").await.unwrap(),
        flat(&["b", "c"])
    );
    // Negative count means no limit.
    assert_eq!(
        server.run("XRANGEBYSCORE k -inf +inf LIMIT 2 -1").await.unwrap(),
        flat(&["c", "d"])
    );
    // Negative offset matches nothing.
    assert_eq!(
        server.run("XRANGEBYSCORE k -inf +inf LIMIT -1 2").await.unwrap(),
        flat(&[])
    );
    // Zero count emits nothing.
    assert_eq!(
        server.run("XRANGEBYSCORE k -inf +inf LIMIT 0 0").await.unwrap(),
        flat(&[])
    );
}

#[tokio::test]
async fn test_xrevrangebyscore_takes_max_then_min() {
    let server = populated().await;
    assert_eq!(
        server.run("XREVRANGEBYSCORE k 3 1").await.unwrap(),
        flat(&["c", "b", "a"])
    );
    assert_eq!(
        server.run("XREVRANGEBYSCORE k +inf -inf LIMIT 1 2").await.unwrap(),
        flat(&["c", "b"])
    );
}

#[tokio::test]
async fn test_xrangebyscore_bad_bound_message() {
    let server = populated().await;
    let err = server.run("XRANGEBYSCORE k one 2").await.unwrap_err();
    assert_eq!(err.to_string(), "min or max is not a float");
}

#[tokio::test]
async fn test_xcount_matches_range_cardinality() {
    let server = populated().await;
    assert_eq!(
        server.run("XCOUNT k 2 3").await.unwrap(),
        RespValue::Integer(2)
    );
    assert_eq!(
        server.run("XCOUNT k (1 +inf").await.unwrap(),
        RespValue::Integer(3)
    );
    assert_eq!(
        server.run("XCOUNT k 10 20").await.unwrap(),
        RespValue::Integer(0)
    );
    assert_eq!(
        server.run("XCOUNT missing -inf +inf").await.unwrap(),
        RespValue::Integer(0)
    );
}

#[tokio::test]
async fn test_missing_key_returns_empty_array() {
    let server = setup();
    assert_eq!(
        server.run("XRANGEBYSCORE missing -inf +inf").await.unwrap(),
        flat(&[])
    );
}
