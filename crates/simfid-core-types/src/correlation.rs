//! Correlation types for comparison runs
//!
//! Every comparison run carries a `RunId` so that the start, end and error
//! events of one run can be joined in structured logs and in the report.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single comparison run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new RunId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through one comparison run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: RunId,
    pub label: Option<String>,
}

impl RunContext {
    /// Create a new context with a fresh RunId
    pub fn new() -> Self {
        Self {
            run_id: RunId::new(),
            label: None,
        }
    }

    /// Create a context with an existing RunId
    pub fn with_run_id(run_id: RunId) -> Self {
        Self {
            run_id,
            label: None,
        }
    }

    /// Attach a human label (e.g. the test case name) to the run
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}
