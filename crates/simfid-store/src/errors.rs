//! Error handling for simfid-store
//!
//! Wraps simfid-core ExError with store-specific helpers

use simfid_core::errors::{ExError, ExErrorKind};
use std::path::Path;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Create an IO error
pub fn io_error(operation: &str, path: &Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_path(path.display().to_string())
        .with_message(err.to_string())
}

/// Create an error for a VTK XML file that cannot be decoded
pub fn malformed_grid(path: &Path, reason: &str) -> ExError {
    ExError::new(ExErrorKind::MalformedGrid)
        .with_op("read_point_data")
        .with_path(path.display().to_string())
        .with_message(reason.to_string())
}

/// Create an error for an XDMF description that cannot be parsed
pub fn malformed_description(label: &str, reason: &str) -> ExError {
    ExError::new(ExErrorKind::MalformedDescription)
        .with_op("parse_description")
        .with_path(label.to_string())
        .with_message(reason.to_string())
}
