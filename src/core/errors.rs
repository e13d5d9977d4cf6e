// src/core/errors.rs

//! Defines the primary error type for the entire application.

use std::num::{ParseFloatError, ParseIntError};
use std::sync::Arc;
use thiserror::Error;

/// The main error enum, representing all possible failures within the server.
/// The `#[error]` strings double as the client-visible error messages, so
/// they follow the wire conventions clients already understand.
#[derive(Error, Debug, Clone)]
pub enum FinityDBError {
    #[error("IO Error: {0}")]
    Io(Arc<std::io::Error>),

    #[error("Incomplete data in stream")]
    IncompleteData,

    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    #[error("syntax error")]
    SyntaxError,

    #[error("wrong number of arguments for '{0}' command")]
    WrongArgumentCount(String),

    #[error("WRONGTYPE Operation against a key holding the wrong kind of value")]
    WrongType,

    #[error("value is not an integer or out of range")]
    NotAnInteger,

    #[error("value is not a valid float")]
    NotAFloat,

    #[error("min or max is not a float")]
    InvalidScoreRange,

    #[error("min or max not valid string range item")]
    InvalidLexRange,

    #[error("Invalid finity")]
    InvalidFinity,

    #[error("finity is not a number (NaN)")]
    FinityNotANumber,

    #[error("resulting score is not a number (NaN)")]
    ScoreNaN,

    /// Mutually exclusive or malformed option combinations carry their own
    /// full message (e.g. NX together with XX).
    #[error("{0}")]
    IncompatibleOptions(String),

    #[error("invalid cursor")]
    InvalidCursor,

    #[error("Internal Server Error: {0}")]
    Internal(String),
}

// --- From trait implementations for easy error conversion ---

impl From<std::io::Error> for FinityDBError {
    fn from(e: std::io::Error) -> Self {
        FinityDBError::Io(Arc::new(e))
    }
}

impl From<std::str::Utf8Error> for FinityDBError {
    fn from(_: std::str::Utf8Error) -> Self {
        FinityDBError::WrongType
    }
}

impl From<std::string::FromUtf8Error> for FinityDBError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        FinityDBError::WrongType
    }
}

impl From<ParseIntError> for FinityDBError {
    fn from(_: ParseIntError) -> Self {
        FinityDBError::NotAnInteger
    }
}

impl From<ParseFloatError> for FinityDBError {
    fn from(_: ParseFloatError) -> Self {
        FinityDBError::NotAFloat
    }
}

impl FinityDBError {
    /// Formats the error for the wire. Errors whose message already begins
    /// with an all-caps error code (e.g. `WRONGTYPE`) are sent verbatim;
    /// everything else gets the generic `ERR` prefix.
    pub fn to_wire_message(&self) -> String {
        match self {
            FinityDBError::WrongType => self.to_string(),
            _ => format!("ERR {self}"),
        }
    }
}
