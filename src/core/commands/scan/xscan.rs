// src/core/commands/scan/xscan.rs

use super::helpers::{format_scan_options_to_bytes, glob_match, parse_scan_args};
use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::extract_bytes;
use crate::core::commands::xset::helpers::format_score;
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::DataValue;
use crate::core::storage::db::ExecutionContext;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

/// Implements the `XSCAN` command for incrementally iterating over the
/// members of a finite sorted set.
#[derive(Debug, Clone, Default)]
pub struct XScan {
    pub key: Bytes,
    pub cursor: u64,
    pub pattern: Option<Bytes>,
    pub count: Option<usize>,
}

impl ParseCommand for XScan {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        if args.len() < 2 {
            return Err(FinityDBError::WrongArgumentCount("XSCAN".to_string()));
        }
        let key = extract_bytes(&args[0])?;
        let (cursor, pattern, count) = parse_scan_args(&args[1..], "XSCAN")?;
        Ok(XScan {
            key,
            cursor,
            pattern,
            count,
        })
    }
}

#[async_trait]
impl ExecutableCommand for XScan {
    /// The cursor is the starting index for iteration within the set's
    /// (score, member) ordering.
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let (cursor, items) = match ctx.keyspace.get(&self.key) {
            Some(entry) => {
                let DataValue::XSet(xset) = &entry.data;
                let count = self.count.unwrap_or(10).max(1);
                let mut result_items = Vec::with_capacity(count * 2);
                let mut new_cursor_pos = self.cursor as usize;

                for entry in xset.iter_entries().skip(self.cursor as usize) {
                    new_cursor_pos += 1;

                    let keep = match &self.pattern {
                        Some(pattern) => glob_match(pattern, &entry.member),
                        None => true,
                    };
                    if keep {
                        result_items.push(RespValue::BulkString(entry.member));
                        result_items.push(RespValue::BulkString(format_score(entry.score)));
                    }

                    if result_items.len() / 2 >= count {
                        break;
                    }
                }

                let new_cursor = if new_cursor_pos >= xset.len() {
                    0
                } else {
                    new_cursor_pos as u64
                };
                (new_cursor, result_items)
            }
            None => (0, vec![]),
        };

        // Reply shape: `[new_cursor, [member1, score1, ...]]`.
        let resp = RespValue::Array(vec![
            RespValue::BulkString(cursor.to_string().into()),
            RespValue::Array(items),
        ]);
        Ok((resp, WriteOutcome::DidNotWrite))
    }
}

impl CommandSpec for XScan {
    fn name(&self) -> &'static str {
        "xscan"
    }
    fn arity(&self) -> i64 {
        -3
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::READONLY
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        let mut args = vec![self.key.clone(), self.cursor.to_string().into()];
        args.extend(format_scan_options_to_bytes(&self.pattern, &self.count));
        args
    }
}
