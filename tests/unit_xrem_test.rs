// tests/unit_xrem_test.rs

mod common;

use common::{frame, setup};
use finitydb::core::RespValue;
use finitydb::core::commands::command_trait::ParseCommand;
use finitydb::core::commands::xset::XRem;
use finitydb::core::events::EventKind;

#[tokio::test]
async fn test_xrem_parse_requires_member() {
    let args = [frame("k")];
    let err = XRem::parse(&args).unwrap_err();
    assert!(format!("{err:?}").contains("WrongArgumentCount"));
}

#[tokio::test]
async fn test_xrem_removes_and_counts() {
    let server = setup();
    server.run("XADD k 1 a 2 b 3 c").await.unwrap();
    assert_eq!(
        server.run("XREM k a c missing").await.unwrap(),
        RespValue::Integer(2)
    );
    assert_eq!(server.run("XCARD k").await.unwrap(), RespValue::Integer(1));
}

#[tokio::test]
async fn test_xrem_missing_key_returns_zero() {
    let server = setup();
    assert_eq!(server.run("XREM k a").await.unwrap(), RespValue::Integer(0));
}

#[tokio::test]
async fn test_xrem_nonexistent_member_returns_zero() {
    let server = setup();
    server.run("XADD k 1 a").await.unwrap();
    assert_eq!(
        server.run("XREM k ghost").await.unwrap(),
        RespValue::Integer(0)
    );
}

#[tokio::test]
async fn test_xrem_last_member_unbinds_key() {
    let server = setup();
    server.run("XADD k 1 m").await.unwrap();
    assert_eq!(server.run("XREM k m").await.unwrap(), RespValue::Integer(1));
    assert_eq!(server.run("EXISTS k").await.unwrap(), RespValue::Integer(0));
    assert_eq!(
        server.run("TYPE k").await.unwrap(),
        RespValue::SimpleString("none".to_string())
    );
}

#[tokio::test]
async fn test_xrem_emits_xrem_then_del_events() {
    let server = setup();
    server.run("XADD k 1 m").await.unwrap();
    let mut events = server.state.notifications.subscribe();
    server.run("XREM k m").await.unwrap();

    let first = events.recv().await.unwrap();
    assert_eq!(first.kind, EventKind::XSet);
    assert_eq!(first.event, "xrem");
    let second = events.recv().await.unwrap();
    assert_eq!(second.kind, EventKind::Generic);
    assert_eq!(second.event, "del");
}
