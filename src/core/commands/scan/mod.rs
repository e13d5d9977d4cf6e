// src/core/commands/scan/mod.rs

//! Cursor-based incremental iteration.

pub mod helpers;
pub mod xscan;

pub use xscan::XScan;
