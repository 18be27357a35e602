//! simfid core - comparison kernel for CFD snapshot fidelity tests
//!
//! This crate holds everything that decides whether two snapshots match,
//! independent of how the files are read:
//! - In-memory models for point-data arrays and XDMF grid descriptions
//! - The three element-wise acceptance rules and the per-stage rule mapping
//! - The point-data and structured-description comparators
//! - The classified error taxonomy and the structured logging facility
//!
//! File decoding lives in `simfid-store`; run orchestration in `simfid-engine`.

pub mod diff;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod policy;
pub mod resolver;
pub mod rules;

// Re-export commonly used types
pub use diff::{
    compare_descriptions, compare_point_data, render_failure, render_success, ComparisonOutcome,
    ComparisonReport, ComparisonSummary,
};
pub use errors::{ExError, ExErrorKind, FidelityError, Result};
pub use model::{FileFormat, NamedNumericArray, ParsedDescription, Tolerance};
pub use policy::{CompareOptions, RuleSet};
pub use resolver::PayloadResolver;
pub use rules::ComparisonRule;
