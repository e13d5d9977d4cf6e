// src/core/commands/command_spec.rs

//! Defines the `CommandSpec` trait, which provides metadata about a command.
//! This is used for introspection and argument round-trips.

use crate::core::commands::command_trait::CommandFlags;
use bytes::Bytes;

/// A trait for describing a command's properties, such as its name, arity,
/// flags, and how to extract keys from its arguments.
pub trait CommandSpec {
    /// The name of the command in lowercase.
    fn name(&self) -> &'static str;

    /// The arity of the command.
    /// - Positive integer: fixed number of arguments.
    /// - Negative integer: minimum number of arguments.
    fn arity(&self) -> i64;

    /// A bitmask of flags describing the command's behavior.
    fn flags(&self) -> CommandFlags;

    /// Extracts the key(s) from a parsed command instance.
    fn get_keys(&self) -> Vec<Bytes>;

    /// Converts the parsed command's arguments back into a vector of
    /// `Bytes` for serialization.
    fn to_resp_args(&self) -> Vec<Bytes>;
}
