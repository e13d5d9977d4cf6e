// tests/unit_protocol_test.rs

use bytes::{Bytes, BytesMut};
use finitydb::core::protocol::{RespFrame, RespFrameCodec};
use tokio_util::codec::{Decoder, Encoder};

fn roundtrip(frame: RespFrame) -> RespFrame {
    let mut codec = RespFrameCodec;
    let mut buf = BytesMut::new();
    codec.encode(frame, &mut buf).unwrap();
    codec.decode(&mut buf).unwrap().unwrap()
}

#[test]
fn test_roundtrip_simple_shapes() {
    assert_eq!(
        roundtrip(RespFrame::SimpleString("OK".into())),
        RespFrame::SimpleString("OK".into())
    );
    assert_eq!(
        roundtrip(RespFrame::Integer(-42)),
        RespFrame::Integer(-42)
    );
    assert_eq!(
        roundtrip(RespFrame::Error("ERR syntax error".into())),
        RespFrame::Error("ERR syntax error".into())
    );
    assert_eq!(roundtrip(RespFrame::Null), RespFrame::Null);
    assert_eq!(roundtrip(RespFrame::NullArray), RespFrame::NullArray);
}

#[test]
fn test_roundtrip_bulk_and_array() {
    let frame = RespFrame::Array(vec![
        RespFrame::BulkString(Bytes::from_static(b"xadd")),
        RespFrame::BulkString(Bytes::from_static(b"key")),
        RespFrame::BulkString(Bytes::from_static(b"1.5")),
        RespFrame::BulkString(Bytes::from_static(b"member\r\nwith crlf")),
    ]);
    assert_eq!(roundtrip(frame.clone()), frame);
}

#[test]
fn test_decode_incomplete_frame_waits() {
    let mut codec = RespFrameCodec;
    let mut buf = BytesMut::from(&b"$5\r\nhel"[..]);
    assert_eq!(codec.decode(&mut buf).unwrap(), None);
    // Nothing consumed until the frame completes.
    assert_eq!(buf.len(), 7);

    buf.extend_from_slice(b"lo\r\n");
    assert_eq!(
        codec.decode(&mut buf).unwrap(),
        Some(RespFrame::BulkString(Bytes::from_static(b"hello")))
    );
    assert!(buf.is_empty());
}

#[test]
fn test_decode_pipelined_frames() {
    let mut codec = RespFrameCodec;
    let mut buf = BytesMut::from(&b":1\r\n:2\r\n"[..]);
    assert_eq!(codec.decode(&mut buf).unwrap(), Some(RespFrame::Integer(1)));
    assert_eq!(codec.decode(&mut buf).unwrap(), Some(RespFrame::Integer(2)));
    assert_eq!(codec.decode(&mut buf).unwrap(), None);
}

#[test]
fn test_decode_rejects_unknown_type_byte() {
    let mut codec = RespFrameCodec;
    let mut buf = BytesMut::from(&b"@oops\r\n"[..]);
    assert!(codec.decode(&mut buf).is_err());
}
