use crate::errors::{FidelityError, Result};
use serde::{Deserialize, Serialize};

/// The tolerance budget applied to every numeric comparison in one run
///
/// Always finite and non-negative. Serializes as a bare number.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Tolerance(f64);

impl Tolerance {
    /// Default budget when the caller gives no override
    pub const DEFAULT: Tolerance = Tolerance(1e-12);

    /// Validate and wrap a tolerance value
    ///
    /// # Errors
    ///
    /// `InvalidTolerance` if the value is negative, NaN or infinite.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(FidelityError::InvalidTolerance {
                value,
                reason: "tolerance must be finite".to_string(),
            });
        }
        if value < 0.0 {
            return Err(FidelityError::InvalidTolerance {
                value,
                reason: "tolerance must be non-negative".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// Resolve an optional override, falling back to [`Tolerance::DEFAULT`]
    ///
    /// # Errors
    ///
    /// `InvalidTolerance` if the override is present and invalid.
    pub fn from_override(value: Option<f64>) -> Result<Self> {
        value.map_or(Ok(Self::DEFAULT), Self::new)
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// The tolerance with its fractional part dropped (`floor`, since it is non-negative)
    pub fn truncated(self) -> f64 {
        self.0.trunc()
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Tolerance {
    type Error = FidelityError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Tolerance> for f64 {
    fn from(tolerance: Tolerance) -> Self {
        tolerance.0
    }
}

impl std::fmt::Display for Tolerance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self.0;
        if v != 0.0 && !(1e-4..1e16).contains(&v) {
            write!(f, "{:e}", v)
        } else {
            write!(f, "{}", v)
        }
    }
}
