// src/core/commands/scan/helpers.rs

use crate::core::FinityDBError;
use crate::core::commands::helpers::{extract_bytes, extract_string};
use crate::core::protocol::RespFrame;
use bytes::Bytes;

/// Matches a byte string against a Redis-style glob pattern.
/// Supports `*`, `?`, `[...]`, `[^...]`, and `\`.
/// This implementation is iterative to prevent stack overflow from complex
/// patterns.
pub fn glob_match(pattern: &[u8], string: &[u8]) -> bool {
    let mut p_idx = 0;
    let mut s_idx = 0;
    let mut star_p_idx = None; // Index in pattern after the last '*'
    let mut star_s_idx = None; // Index in string to backtrack to on mismatch

    while s_idx < string.len() {
        match pattern.get(p_idx) {
            Some(b'?') => {
                p_idx += 1;
                s_idx += 1;
            }
            Some(b'*') => {
                star_p_idx = Some(p_idx + 1);
                star_s_idx = Some(s_idx);
                p_idx += 1;
            }
            Some(b'[') => match parse_char_set(&pattern[p_idx..], string[s_idx]) {
                Some(len) => {
                    p_idx += len;
                    s_idx += 1;
                }
                None => {
                    if let (Some(p), Some(s)) = (star_p_idx, star_s_idx) {
                        p_idx = p;
                        s_idx = s + 1;
                        star_s_idx = Some(s + 1);
                    } else {
                        return false;
                    }
                }
            },
            Some(b'\\') if p_idx + 1 < pattern.len() => {
                if pattern[p_idx + 1] == string[s_idx] {
                    p_idx += 2;
                    s_idx += 1;
                } else if let (Some(p), Some(s)) = (star_p_idx, star_s_idx) {
                    p_idx = p;
                    s_idx = s + 1;
                    star_s_idx = Some(s + 1);
                } else {
                    return false;
                }
            }
            Some(&p_char) if p_char == string[s_idx] => {
                p_idx += 1;
                s_idx += 1;
            }
            _ => {
                if let (Some(p), Some(s)) = (star_p_idx, star_s_idx) {
                    p_idx = p;
                    s_idx = s + 1;
                    star_s_idx = Some(s + 1);
                } else {
                    return false;
                }
            }
        }
    }

    // Consume any trailing stars in the pattern.
    while pattern.get(p_idx) == Some(&b'*') {
        p_idx += 1;
    }
    p_idx == pattern.len()
}

/// Matches one character against a `[...]` set starting at `pattern[0]`.
/// Returns the set's length in the pattern when the character matches.
fn parse_char_set(pattern: &[u8], ch: u8) -> Option<usize> {
    let mut idx = 1;
    let negated = pattern.get(idx) == Some(&b'^');
    if negated {
        idx += 1;
    }
    let mut matched = false;
    let mut first = true;
    while let Some(&p) = pattern.get(idx) {
        if p == b']' && !first {
            let result = matched != negated;
            return result.then_some(idx + 1);
        }
        first = false;
        // Range form a-z.
        if pattern.get(idx + 1) == Some(&b'-')
            && pattern.get(idx + 2).is_some_and(|&c| c != b']')
        {
            let lo = p.min(pattern[idx + 2]);
            let hi = p.max(pattern[idx + 2]);
            if (lo..=hi).contains(&ch) {
                matched = true;
            }
            idx += 3;
        } else {
            if p == ch {
                matched = true;
            }
            idx += 1;
        }
    }
    None
}

/// Parses the `cursor [MATCH pattern] [COUNT n]` tail shared by the scan
/// commands, starting at `args[0]` being the cursor.
pub fn parse_scan_args(
    args: &[RespFrame],
    cmd: &str,
) -> Result<(u64, Option<Bytes>, Option<usize>), FinityDBError> {
    if args.is_empty() {
        return Err(FinityDBError::WrongArgumentCount(cmd.to_string()));
    }
    let cursor = extract_string(&args[0])?
        .parse::<u64>()
        .map_err(|_| FinityDBError::InvalidCursor)?;

    let mut pattern = None;
    let mut count = None;
    let mut i = 1;
    while i < args.len() {
        let token = extract_string(&args[i])?;
        if token.eq_ignore_ascii_case("match") && i + 1 < args.len() {
            pattern = Some(extract_bytes(&args[i + 1])?);
            i += 2;
        } else if token.eq_ignore_ascii_case("count") && i + 1 < args.len() {
            let n = extract_string(&args[i + 1])?
                .parse::<usize>()
                .map_err(|_| FinityDBError::NotAnInteger)?;
            count = Some(n);
            i += 2;
        } else {
            return Err(FinityDBError::SyntaxError);
        }
    }
    Ok((cursor, pattern, count))
}

/// Re-serializes scan options for argument round-trips.
pub fn format_scan_options_to_bytes(
    pattern: &Option<Bytes>,
    count: &Option<usize>,
) -> Vec<Bytes> {
    let mut args = Vec::new();
    if let Some(p) = pattern {
        args.push("MATCH".into());
        args.push(p.clone());
    }
    if let Some(n) = count {
        args.push("COUNT".into());
        args.push(n.to_string().into());
    }
    args
}
