// src/core/commands/helpers.rs

//! Provides helper functions for parsing command arguments from `RespFrame`s.
//! These helpers reduce boilerplate and ensure consistent error handling
//! across commands.

use crate::core::FinityDBError;
use crate::core::protocol::RespFrame;
use bytes::Bytes;

/// Extracts a `String` from a `RespFrame::BulkString`.
/// Returns a `WrongType` error if the frame is not a BulkString or not
/// valid UTF-8.
pub fn extract_string(frame: &RespFrame) -> Result<String, FinityDBError> {
    if let RespFrame::BulkString(bs) = frame {
        String::from_utf8(bs.to_vec()).map_err(|_| FinityDBError::WrongType)
    } else {
        Err(FinityDBError::WrongType)
    }
}

/// Extracts `Bytes` from a `RespFrame::BulkString`.
pub fn extract_bytes(frame: &RespFrame) -> Result<Bytes, FinityDBError> {
    match frame {
        RespFrame::BulkString(bs) => Ok(bs.clone()),
        _ => Err(FinityDBError::WrongType),
    }
}

/// Validates that the number of arguments matches an exact expected count.
pub fn validate_arg_count(
    args: &[RespFrame],
    expected: usize,
    cmd: &str,
) -> Result<(), FinityDBError> {
    if args.len() != expected {
        Err(FinityDBError::WrongArgumentCount(cmd.to_string()))
    } else {
        Ok(())
    }
}

/// Parses arguments for commands that follow the pattern
/// `COMMAND key value1 [value2 ...]`.
pub fn parse_key_and_values(
    args: &[RespFrame],
    min_args: usize,
    cmd: &str,
) -> Result<(Bytes, Vec<Bytes>), FinityDBError> {
    if args.len() < min_args {
        return Err(FinityDBError::WrongArgumentCount(cmd.to_string()));
    }
    let key = extract_bytes(&args[0])?;
    let values = args[1..]
        .iter()
        .map(extract_bytes)
        .collect::<Result<_, _>>()?;
    Ok((key, values))
}

/// Parses a signed 64-bit integer argument.
pub fn extract_i64(frame: &RespFrame) -> Result<i64, FinityDBError> {
    match frame {
        RespFrame::Integer(i) => Ok(*i),
        _ => extract_string(frame)?
            .parse::<i64>()
            .map_err(|_| FinityDBError::NotAnInteger),
    }
}
