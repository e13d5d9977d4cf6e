// src/core/protocol/resp_frame.rs

//! Implements the RESP (REdis Serialization Protocol) frame structure and the
//! corresponding `Encoder` and `Decoder` for network communication.

use crate::core::FinityDBError;
use bytes::{Buf, Bytes, BytesMut};
use tokio_util::codec::{Decoder, Encoder};

/// The CRLF (Carriage Return, Line Feed) sequence used to terminate lines in RESP.
const CRLF: &[u8] = b"\r\n";

// Protocol-level limits to prevent unbounded allocation from malformed frames.
const MAX_FRAME_ELEMENTS: usize = 1_024 * 1_024;
const MAX_BULK_STRING_SIZE: usize = 512 * 1024 * 1024;

/// An enum representing a single frame in the RESP2 protocol.
/// This is the low-level representation of data exchanged between the client
/// and the server.
#[derive(Debug, Clone, PartialEq)]
pub enum RespFrame {
    SimpleString(String),
    Error(String),
    Integer(i64),
    BulkString(Bytes),
    Null,
    NullArray,
    Array(Vec<RespFrame>),
}

impl RespFrame {
    /// A convenience method to encode a frame into a `Vec<u8>`.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>, FinityDBError> {
        let mut buf = BytesMut::new();
        RespFrameCodec.encode(self.clone(), &mut buf)?;
        Ok(buf.to_vec())
    }
}

/// A `tokio_util::codec` implementation for encoding and decoding `RespFrame`s.
#[derive(Debug, Default)]
pub struct RespFrameCodec;

impl Encoder<RespFrame> for RespFrameCodec {
    type Error = FinityDBError;

    fn encode(&mut self, item: RespFrame, dst: &mut BytesMut) -> Result<(), Self::Error> {
        match item {
            RespFrame::SimpleString(s) => {
                dst.extend_from_slice(b"+");
                dst.extend_from_slice(s.as_bytes());
                dst.extend_from_slice(CRLF);
            }
            RespFrame::Error(s) => {
                dst.extend_from_slice(b"-");
                dst.extend_from_slice(s.as_bytes());
                dst.extend_from_slice(CRLF);
            }
            RespFrame::Integer(i) => {
                let mut buf = itoa::Buffer::new();
                dst.extend_from_slice(b":");
                dst.extend_from_slice(buf.format(i).as_bytes());
                dst.extend_from_slice(CRLF);
            }
            RespFrame::BulkString(b) => {
                let mut buf = itoa::Buffer::new();
                dst.extend_from_slice(b"$");
                dst.extend_from_slice(buf.format(b.len()).as_bytes());
                dst.extend_from_slice(CRLF);
                dst.extend_from_slice(&b);
                dst.extend_from_slice(CRLF);
            }
            RespFrame::Null => dst.extend_from_slice(b"$-1\r\n"),
            RespFrame::NullArray => dst.extend_from_slice(b"*-1\r\n"),
            RespFrame::Array(frames) => {
                let mut buf = itoa::Buffer::new();
                dst.extend_from_slice(b"*");
                dst.extend_from_slice(buf.format(frames.len()).as_bytes());
                dst.extend_from_slice(CRLF);
                for frame in frames {
                    self.encode(frame, dst)?;
                }
            }
        }
        Ok(())
    }
}

impl Decoder for RespFrameCodec {
    type Item = RespFrame;
    type Error = FinityDBError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        let mut cursor = 0usize;
        match parse_frame(src, &mut cursor)? {
            Some(frame) => {
                src.advance(cursor);
                Ok(Some(frame))
            }
            None => Ok(None),
        }
    }
}

/// Parses a single frame starting at `*pos`. Returns `Ok(None)` when the
/// buffer does not yet contain a complete frame.
fn parse_frame(src: &BytesMut, pos: &mut usize) -> Result<Option<RespFrame>, FinityDBError> {
    let Some(type_byte) = src.get(*pos).copied() else {
        return Ok(None);
    };
    *pos += 1;
    match type_byte {
        b'+' => {
            let Some(line) = read_line(src, pos) else {
                return Ok(None);
            };
            Ok(Some(RespFrame::SimpleString(
                String::from_utf8(line.to_vec())?,
            )))
        }
        b'-' => {
            let Some(line) = read_line(src, pos) else {
                return Ok(None);
            };
            Ok(Some(RespFrame::Error(String::from_utf8(line.to_vec())?)))
        }
        b':' => {
            let Some(line) = read_line(src, pos) else {
                return Ok(None);
            };
            let i = std::str::from_utf8(line)?
                .parse::<i64>()
                .map_err(|_| FinityDBError::SyntaxError)?;
            Ok(Some(RespFrame::Integer(i)))
        }
        b'$' => {
            let Some(line) = read_line(src, pos) else {
                return Ok(None);
            };
            let len = std::str::from_utf8(line)?
                .parse::<i64>()
                .map_err(|_| FinityDBError::SyntaxError)?;
            if len == -1 {
                return Ok(Some(RespFrame::Null));
            }
            if len < 0 || len as usize > MAX_BULK_STRING_SIZE {
                return Err(FinityDBError::SyntaxError);
            }
            let len = len as usize;
            if src.len() < *pos + len + 2 {
                return Ok(None);
            }
            let data = Bytes::copy_from_slice(&src[*pos..*pos + len]);
            if &src[*pos + len..*pos + len + 2] != CRLF {
                return Err(FinityDBError::SyntaxError);
            }
            *pos += len + 2;
            Ok(Some(RespFrame::BulkString(data)))
        }
        b'*' => {
            let Some(line) = read_line(src, pos) else {
                return Ok(None);
            };
            let len = std::str::from_utf8(line)?
                .parse::<i64>()
                .map_err(|_| FinityDBError::SyntaxError)?;
            if len == -1 {
                return Ok(Some(RespFrame::NullArray));
            }
            if len < 0 || len as usize > MAX_FRAME_ELEMENTS {
                return Err(FinityDBError::SyntaxError);
            }
            let mut frames = Vec::with_capacity(len as usize);
            for _ in 0..len {
                match parse_frame(src, pos)? {
                    Some(frame) => frames.push(frame),
                    None => return Ok(None),
                }
            }
            Ok(Some(RespFrame::Array(frames)))
        }
        _ => Err(FinityDBError::SyntaxError),
    }
}

/// Reads a CRLF-terminated line starting at `*pos`, advancing past the CRLF.
/// Returns `None` when the line is not complete yet.
fn read_line<'a>(src: &'a BytesMut, pos: &mut usize) -> Option<&'a [u8]> {
    let start = *pos;
    let end = src[start..]
        .windows(2)
        .position(|w| w == CRLF)
        .map(|i| start + i)?;
    *pos = end + 2;
    Some(&src[start..end])
}
