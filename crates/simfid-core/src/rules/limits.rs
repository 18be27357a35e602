use crate::errors::{FidelityError, Result};

/// Refuse to compare a unit holding more than `limit` elements
///
/// # Errors
///
/// `ElementLimitExceeded` when `count > limit`. No limit means no check.
pub fn check_element_limit(unit: &str, count: usize, limit: Option<usize>) -> Result<()> {
    match limit {
        Some(limit) if count > limit => Err(FidelityError::ElementLimitExceeded {
            unit: unit.to_string(),
            count,
            limit,
        }),
        _ => Ok(()),
    }
}
