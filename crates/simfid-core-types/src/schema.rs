//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";
pub const FIELD_LABEL: &str = "label";

// Comparison context
pub const FIELD_FORMAT: &str = "format";
pub const FIELD_TOLERANCE: &str = "tolerance";
pub const FIELD_FIRST_PATH: &str = "first_path";
pub const FIELD_SECOND_PATH: &str = "second_path";

// Collection sizes
pub const FIELD_UNITS_COMPARED: &str = "units_compared";
pub const FIELD_VALUES_COMPARED: &str = "values_compared";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";
pub const FIELD_MISMATCH: &str = "mismatch";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
