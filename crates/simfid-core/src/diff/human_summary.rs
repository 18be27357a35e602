//! Human-readable run summaries.
//!
//! Both renderers are informational only. Callers decide where the text goes
//! (the CLI prints success on stdout and failures on stderr).

use crate::diff::model::ComparisonReport;
use crate::errors::ExError;

/// Render the confirmation line for a passed run
pub fn render_success(report: &ComparisonReport) -> String {
    format!(
        "Fidelity test completed successfully with tolerance {}",
        report.tolerance
    )
}

/// Render a failed run's diagnostic
///
/// The first line carries the classified message. The values each file held
/// follow on `File 1:` and `File 2:` lines when the failure recorded them.
pub fn render_failure(err: &ExError) -> String {
    let mut out = String::new();

    let message = if err.message().is_empty() {
        err.kind().code()
    } else {
        err.message()
    };
    out.push_str(&format!("Fidelity test failed: {}\n", message));

    if let Some(subject) = err.subject() {
        out.push_str(&format!("Unit: {}\n", subject));
    }
    if let Some(element) = err.element_index() {
        out.push_str(&format!("Element: {}\n", element));
    }
    if let Some(first) = err.first() {
        out.push_str(&format!("File 1: {}\n", first));
    }
    if let Some(second) = err.second() {
        out.push_str(&format!("File 2: {}\n", second));
    }
    if let Some(tolerance) = err.tolerance() {
        out.push_str(&format!("Tolerance: {}\n", tolerance));
    }
    if let Some(path) = err.path() {
        out.push_str(&format!("Path: {}\n", path));
    }
    out.push_str(&format!("Code: {}\n", err.code()));

    out
}
