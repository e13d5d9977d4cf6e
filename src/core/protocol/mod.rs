// src/core/protocol/mod.rs

//! The wire protocol layer: RESP2 frames, their codec, and the simplified
//! value type used by the command execution layer.

pub mod resp_frame;
pub mod resp_value;

pub use resp_frame::{RespFrame, RespFrameCodec};
pub use resp_value::RespValue;
