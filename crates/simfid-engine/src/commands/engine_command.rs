//! Engine-level commands that require file and container I/O.

#![allow(clippy::result_large_err)]

use crate::commands::compare::{run_comparison_with_reader, ComparisonRequest};
use serde::{Deserialize, Serialize};
use simfid_core::ComparisonReport;
use simfid_store::container::ContainerReader;
use simfid_store::errors::Result;

/// Engine-level commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum EngineCommand {
    /// Compare two snapshot files of the same format.
    Compare(ComparisonRequest),
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    /// Both snapshots agree within tolerance.
    Compare(ComparisonReport),
}

/// Apply an engine command, resolving structured payloads through `reader`.
pub fn apply_engine_command(
    cmd: EngineCommand,
    reader: &dyn ContainerReader,
) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::Compare(request) => {
            let report = run_comparison_with_reader(&request, reader)?;
            Ok(EngineCommandResult::Compare(report))
        }
    }
}
