// src/core/commands/xset/helpers.rs

use crate::core::commands::helpers::{extract_i64, extract_string};
use crate::core::protocol::RespFrame;
use crate::core::storage::xset::XSetEntry;
use crate::core::storage::xset::range::{LexRange, ScoreRange};
use crate::core::{FinityDBError, RespValue};
use bytes::Bytes;

/// Formats a score the way clients expect: integral finite values print
/// with no fractional part, everything else as the shortest decimal that
/// round-trips, with infinities spelled out.
pub fn format_score(score: f64) -> Bytes {
    if score.is_infinite() {
        let text: &[u8] = if score > 0.0 { b"inf" } else { b"-inf" };
        return Bytes::from_static(text);
    }
    if score == score.trunc() && score.abs() < 1e17 {
        let mut buf = itoa::Buffer::new();
        Bytes::copy_from_slice(buf.format(score as i64).as_bytes())
    } else {
        let mut buf = ryu::Buffer::new();
        Bytes::copy_from_slice(buf.format(score).as_bytes())
    }
}

/// Parses a score range from the `min` / `max` command arguments.
pub fn parse_score_range_args(
    min: &RespFrame,
    max: &RespFrame,
) -> Result<ScoreRange, FinityDBError> {
    let min = extract_string(min).map_err(|_| FinityDBError::InvalidScoreRange)?;
    let max = extract_string(max).map_err(|_| FinityDBError::InvalidScoreRange)?;
    ScoreRange::parse(&min, &max)
}

/// Parses a lex range from the `min` / `max` command arguments. The bounds
/// must arrive as strings; integer-encoded arguments can never form a
/// valid range item.
pub fn parse_lex_range_args(min: &RespFrame, max: &RespFrame) -> Result<LexRange, FinityDBError> {
    let (RespFrame::BulkString(min), RespFrame::BulkString(max)) = (min, max) else {
        return Err(FinityDBError::InvalidLexRange);
    };
    LexRange::parse(min, max)
}

/// Formats a list of entries as the flat multi-bulk reply of the range
/// commands: members only, or alternating member/score pairs.
pub fn format_entries_reply(entries: Vec<XSetEntry>, with_scores: bool) -> RespValue {
    let mut response = Vec::with_capacity(entries.len() * if with_scores { 2 } else { 1 });
    for entry in entries {
        response.push(RespValue::BulkString(entry.member));
        if with_scores {
            response.push(RespValue::BulkString(format_score(entry.score)));
        }
    }
    RespValue::Array(response)
}

/// Parses the `start stop [WITHSCORES]` tail of XRANGE / XREVRANGE.
pub fn parse_rank_range_args(args: &[RespFrame]) -> Result<(i64, i64, bool), FinityDBError> {
    let start = extract_i64(&args[1])?;
    let stop = extract_i64(&args[2])?;
    let mut with_scores = false;
    if args.len() == 4 {
        if extract_string(&args[3])?.eq_ignore_ascii_case("withscores") {
            with_scores = true;
        } else {
            return Err(FinityDBError::SyntaxError);
        }
    } else if args.len() > 4 {
        return Err(FinityDBError::SyntaxError);
    }
    Ok((start, stop, with_scores))
}

/// Parses the optional `[WITHSCORES] [LIMIT offset count]` tail of the
/// score-range commands, starting at `args[from]`.
pub fn parse_score_tail_args(
    args: &[RespFrame],
    from: usize,
    allow_withscores: bool,
) -> Result<(bool, i64, i64), FinityDBError> {
    let mut with_scores = false;
    let mut offset = 0i64;
    let mut limit = -1i64;
    let mut pos = from;
    while pos < args.len() {
        let token = extract_string(&args[pos])?;
        if allow_withscores && token.eq_ignore_ascii_case("withscores") {
            with_scores = true;
            pos += 1;
        } else if token.eq_ignore_ascii_case("limit") && pos + 2 < args.len() {
            offset = extract_i64(&args[pos + 1])?;
            limit = extract_i64(&args[pos + 2])?;
            pos += 3;
        } else {
            return Err(FinityDBError::SyntaxError);
        }
    }
    Ok((with_scores, offset, limit))
}
