//! Command orchestration layer.
//!
//! Provides high-level command functions that coordinate between
//! the comparison core and the snapshot readers.

pub mod compare;
pub mod engine_command;
