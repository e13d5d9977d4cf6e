// src/core/commands/mod.rs

//! This module defines all supported commands and provides the central
//! `Command` enum that encapsulates their parsed state. The
//! `define_commands!` macro generates the enum and its core
//! implementations, reducing boilerplate and ensuring consistency.

use crate::core::commands::command_spec::CommandSpec;
use crate::core::commands::command_trait::{ExecutableCommand, ParseCommand, WriteOutcome};
use crate::core::commands::helpers::extract_string;
use crate::core::protocol::RespFrame;
use crate::core::storage::db::ExecutionContext;
use crate::core::{FinityDBError, RespValue};
use async_trait::async_trait;
use bytes::Bytes;

pub mod command_spec;
pub mod command_trait;
pub mod generic;
pub mod helpers;
pub mod scan;
pub mod xset;

macro_rules! define_commands {
    ( $( ($variant:ident, $command:ty, $name:literal) ),+ $(,)? ) => {
        /// The parsed form of every command the server understands.
        #[derive(Debug, Clone)]
        pub enum Command {
            $( $variant($command), )+
        }

        impl Command {
            /// Parses a complete client frame (an array whose first element
            /// is the command name) into a `Command`.
            pub fn from_frame(frame: RespFrame) -> Result<Self, FinityDBError> {
                let RespFrame::Array(parts) = frame else {
                    return Err(FinityDBError::SyntaxError);
                };
                let Some((name_frame, args)) = parts.split_first() else {
                    return Err(FinityDBError::SyntaxError);
                };
                let name = extract_string(name_frame)?.to_ascii_lowercase();
                match name.as_str() {
                    $( $name => Ok(Command::$variant(<$command>::parse(args)?)), )+
                    _ => Err(FinityDBError::UnknownCommand(name)),
                }
            }
        }

        #[async_trait]
        impl ExecutableCommand for Command {
            async fn execute<'a>(
                &self,
                ctx: &mut ExecutionContext<'a>,
            ) -> Result<(RespValue, WriteOutcome), FinityDBError> {
                match self {
                    $( Command::$variant(cmd) => cmd.execute(ctx).await, )+
                }
            }
        }

        impl CommandSpec for Command {
            fn name(&self) -> &'static str {
                match self {
                    $( Command::$variant(cmd) => cmd.name(), )+
                }
            }
            fn arity(&self) -> i64 {
                match self {
                    $( Command::$variant(cmd) => cmd.arity(), )+
                }
            }
            fn flags(&self) -> command_trait::CommandFlags {
                match self {
                    $( Command::$variant(cmd) => cmd.flags(), )+
                }
            }
            fn get_keys(&self) -> Vec<Bytes> {
                match self {
                    $( Command::$variant(cmd) => cmd.get_keys(), )+
                }
            }
            fn to_resp_args(&self) -> Vec<Bytes> {
                match self {
                    $( Command::$variant(cmd) => cmd.to_resp_args(), )+
                }
            }
        }
    };
}

define_commands! {
    // --- Finite sorted set commands ---
    (XAdd, xset::XAdd, "xadd"),
    (XIncrBy, xset::XIncrBy, "xincrby"),
    (XRem, xset::XRem, "xrem"),
    (XCard, xset::XCard, "xcard"),
    (XScore, xset::XScore, "xscore"),
    (XRank, xset::XRank, "xrank"),
    (XRevRank, xset::XRevRank, "xrevrank"),
    (XRange, xset::XRange, "xrange"),
    (XRevRange, xset::XRevRange, "xrevrange"),
    (XRangeByScore, xset::XRangeByScore, "xrangebyscore"),
    (XRevRangeByScore, xset::XRevRangeByScore, "xrevrangebyscore"),
    (XRangeByLex, xset::XRangeByLex, "xrangebylex"),
    (XRevRangeByLex, xset::XRevRangeByLex, "xrevrangebylex"),
    (XCount, xset::XCount, "xcount"),
    (XLexCount, xset::XLexCount, "xlexcount"),
    (XRemRangeByRank, xset::XRemRangeByRank, "xremrangebyrank"),
    (XRemRangeByScore, xset::XRemRangeByScore, "xremrangebyscore"),
    (XRemRangeByLex, xset::XRemRangeByLex, "xremrangebylex"),
    (XSetOptions, xset::XSetOptions, "xsetoptions"),
    (XGetFinity, xset::XGetFinity, "xgetfinity"),
    (XGetPruning, xset::XGetPruning, "xgetpruning"),

    // --- Scan commands ---
    (XScan, scan::XScan, "xscan"),

    // --- Generic commands ---
    (Del, generic::Del, "del"),
    (Exists, generic::Exists, "exists"),
    (Type, generic::TypeInfo, "type"),
}
