// src/core/commands/xset/xrem.rs

use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{
    CommandFlags, ExecutableCommand, ParseCommand, WriteOutcome,
};
use crate::core::commands::helpers::parse_key_and_values;
use crate::core::events::EventKind;
use crate::core::protocol::RespFrame;
use crate::core::storage::data_types::DataValue;
use crate::core::storage::db::ExecutionContext;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

#[derive(Debug, Clone, Default)]
pub struct XRem {
    pub key: Bytes,
    pub members: Vec<Bytes>,
}

impl ParseCommand for XRem {
    fn parse(args: &[RespFrame]) -> Result<Self, FinityDBError> {
        let (key, members) = parse_key_and_values(args, 2, "XREM")?;
        Ok(XRem { key, members })
    }
}

#[async_trait]
impl ExecutableCommand for XRem {
    async fn execute<'a>(
        &self,
        ctx: &mut ExecutionContext<'a>,
    ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
        let Some(entry) = ctx.keyspace.get_mut(&self.key) else {
            return Ok((RespValue::Integer(0), WriteOutcome::DidNotWrite));
        };
        let DataValue::XSet(xset) = &mut entry.data;

        let mut deleted = 0i64;
        for member in &self.members {
            if xset.remove(member) {
                deleted += 1;
                if xset.is_empty() {
                    break;
                }
            }
        }
        let key_removed = xset.is_empty();

        let outcome = if deleted > 0 {
            if key_removed {
                ctx.keyspace.pop(&self.key);
                WriteOutcome::Delete { keys_deleted: 1 }
            } else {
                entry.mark_modified();
                WriteOutcome::Write { keys_modified: 1 }
            }
        } else {
            WriteOutcome::DidNotWrite
        };

        if deleted > 0 {
            ctx.state.notify(EventKind::XSet, "xrem", &self.key);
            if key_removed {
                ctx.state.notify(EventKind::Generic, "del", &self.key);
            }
            ctx.state.add_dirty(deleted as u64);
        }
        Ok((RespValue::Integer(deleted), outcome))
    }
}

impl CommandSpec for XRem {
    fn name(&self) -> &'static str {
        "xrem"
    }
    fn arity(&self) -> i64 {
        -3
    }
    fn flags(&self) -> CommandFlags {
        CommandFlags::WRITE
    }
    fn get_keys(&self) -> Vec<Bytes> {
        vec![self.key.clone()]
    }
    fn to_resp_args(&self) -> Vec<Bytes> {
        let mut args = vec![self.key.clone()];
        args.extend(self.members.clone());
        args
    }
}
