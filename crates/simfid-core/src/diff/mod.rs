//! Fidelity comparators.
//!
//! Two independent pipelines share one outcome contract:
//!
//! - [`point_data::compare_point_data`] walks unstructured-grid point-data arrays
//! - [`structured::compare_descriptions`] walks parsed XDMF descriptions,
//!   resolving payloads through a [`PayloadResolver`](crate::resolver::PayloadResolver)
//!
//! Both are pure functions over already-loaded inputs. They stop at the first
//! violation and return it as a [`FidelityError`](crate::errors::FidelityError);
//! structural checks always run before any value is compared.
//!
//! ```ignore
//! let summary = compare_point_data(&first_arrays, &second_arrays, &CompareOptions::default())?;
//! ```

pub mod human_summary;
pub mod model;
pub mod point_data;
pub mod structured;

pub use human_summary::{render_failure, render_success};
pub use model::{ComparisonOutcome, ComparisonReport, ComparisonSummary};
pub use point_data::compare_point_data;
pub use structured::compare_descriptions;
