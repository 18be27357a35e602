//! simfid engine - orchestration layer
//!
//! Coordinates the snapshot readers in `simfid-store` with the comparators in
//! `simfid-core` and owns the lifecycle logging of each comparison run.

pub mod commands;

pub use commands::compare::{run_comparison, run_comparison_with_reader, ComparisonRequest};
pub use commands::engine_command::{apply_engine_command, EngineCommand, EngineCommandResult};
