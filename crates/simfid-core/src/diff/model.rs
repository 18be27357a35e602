//! Comparison result types.
//!
//! The comparators return a [`ComparisonSummary`]; the engine wraps it with run
//! identity and input digests into a [`ComparisonReport`].

use crate::errors::ExError;
use crate::model::{FileFormat, Tolerance};
use serde::{Deserialize, Serialize};
use simfid_core_types::RunId;

/// Counts gathered by one successful comparator call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    /// Arrays, or Topology/Geometry/attribute blocks, that passed
    pub units_compared: usize,
    /// Scalar element pairs checked against the tolerance
    pub values_compared: usize,
}

impl ComparisonSummary {
    /// Record one passed unit holding `values` element pairs
    pub fn record_unit(&mut self, values: usize) {
        self.units_compared += 1;
        self.values_compared += values;
    }
}

/// What a successful fidelity run establishes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub run_id: RunId,
    pub format: FileFormat,
    pub tolerance: Tolerance,
    pub units_compared: usize,
    pub values_compared: usize,
    /// SHA-256 of file 1, hex encoded
    pub first_digest: String,
    /// SHA-256 of file 2, hex encoded
    pub second_digest: String,
}

impl ComparisonReport {
    pub fn new(
        run_id: RunId,
        format: FileFormat,
        tolerance: Tolerance,
        summary: ComparisonSummary,
    ) -> Self {
        Self {
            run_id,
            format,
            tolerance,
            units_compared: summary.units_compared,
            values_compared: summary.values_compared,
            first_digest: String::new(),
            second_digest: String::new(),
        }
    }

    pub fn with_digests(mut self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.first_digest = first.into();
        self.second_digest = second.into();
        self
    }
}

/// Success report, or the first classified failure
pub type ComparisonOutcome = std::result::Result<ComparisonReport, ExError>;
