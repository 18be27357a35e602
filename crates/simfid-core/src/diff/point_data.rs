//! Point-data comparison for unstructured grids.
//!
//! Arrays are matched purely by position. For each index the checks run in a
//! fixed order (count, then name, then size, then values) and the first
//! violation ends the comparison.

use crate::diff::model::ComparisonSummary;
use crate::errors::{FidelityError, Result};
use crate::model::NamedNumericArray;
use crate::policy::CompareOptions;
use crate::rules::check_element_limit;

/// Compare the point-data arrays of two grids
///
/// `first` and `second` must be in file-native order. Uses
/// `options.rules.point_data` for values.
///
/// # Errors
///
/// `ArrayCountMismatch`, `ArrayNameMismatch`, `ArraySizeMismatch`,
/// `ElementLimitExceeded` or `ArrayValueMismatch`, whichever comes first.
pub fn compare_point_data(
    first: &[NamedNumericArray],
    second: &[NamedNumericArray],
    options: &CompareOptions,
) -> Result<ComparisonSummary> {
    if first.len() != second.len() {
        return Err(FidelityError::ArrayCountMismatch {
            first: first.len(),
            second: second.len(),
        });
    }

    let rule = options.rules.point_data;
    let tolerance = options.tolerance;
    let mut summary = ComparisonSummary::default();

    for (index, (arr1, arr2)) in first.iter().zip(second).enumerate() {
        if arr1.name != arr2.name {
            return Err(FidelityError::ArrayNameMismatch {
                index,
                first: arr1.name.clone(),
                second: arr2.name.clone(),
            });
        }

        if arr1.len() != arr2.len() {
            return Err(FidelityError::ArraySizeMismatch {
                index,
                name: arr1.name.clone(),
                first: arr1.len(),
                second: arr2.len(),
            });
        }

        check_element_limit(&arr1.name, arr1.len(), options.max_elements)?;

        let mismatch = arr1
            .values
            .iter()
            .zip(&arr2.values)
            .position(|(&a, &b)| !rule.accepts(a, b, tolerance));
        if let Some(element) = mismatch {
            return Err(FidelityError::ArrayValueMismatch {
                index,
                name: arr1.name.clone(),
                element,
                first: arr1.values[element],
                second: arr2.values[element],
                tolerance: rule.effective_tolerance(tolerance),
            });
        }

        tracing::debug!(
            array = %arr1.name,
            index,
            values = arr1.len(),
            tuples = arr1.tuple_count(),
            "point-data array matched"
        );
        summary.record_unit(arr1.len());
    }

    Ok(summary)
}
