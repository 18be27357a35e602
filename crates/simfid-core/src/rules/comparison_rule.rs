//! Element-wise acceptance rules.
//!
//! Three rules are in use and each pipeline stage names the one it applies
//! (see [`RuleSet`](crate::policy::RuleSet)):
//!
//! | Rule | Accepts when |
//! |------|--------------|
//! | `SignedDelta` | `first - second <= t` |
//! | `AbsoluteDeltaTruncatedTolerance` | `|first - second| <= floor(t)` |
//! | `AbsoluteDeltaTolerance` | `|first - second| <= t` |
//!
//! `SignedDelta` is one-sided: a first value *below* the second by any amount
//! is accepted. Point-data comparison has always behaved this way and the
//! divergence from the absolute rules is kept until its intent is confirmed.
//!
//! All rules accept two bit-identical values (including matching NaN or
//! infinities), so a file always matches itself.

use crate::model::Tolerance;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComparisonRule {
    SignedDelta,
    AbsoluteDeltaTruncatedTolerance,
    AbsoluteDeltaTolerance,
}

impl ComparisonRule {
    /// The bound this rule compares the delta against
    pub fn effective_tolerance(self, tolerance: Tolerance) -> f64 {
        match self {
            ComparisonRule::AbsoluteDeltaTruncatedTolerance => tolerance.truncated(),
            ComparisonRule::SignedDelta | ComparisonRule::AbsoluteDeltaTolerance => {
                tolerance.value()
            }
        }
    }

    /// Whether the pair `(first, second)` passes under `tolerance`
    pub fn accepts(self, first: f64, second: f64, tolerance: Tolerance) -> bool {
        if first.to_bits() == second.to_bits() || (first.is_nan() && second.is_nan()) {
            return true;
        }
        let bound = self.effective_tolerance(tolerance);
        match self {
            // NaN deltas compare false here, so they pass: same as the
            // historical `(a - b) > t` check.
            ComparisonRule::SignedDelta => !(first - second > bound),
            ComparisonRule::AbsoluteDeltaTruncatedTolerance
            | ComparisonRule::AbsoluteDeltaTolerance => (first - second).abs() <= bound,
        }
    }
}

impl std::fmt::Display for ComparisonRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ComparisonRule::SignedDelta => "signed-delta",
            ComparisonRule::AbsoluteDeltaTruncatedTolerance => "absolute-delta-truncated",
            ComparisonRule::AbsoluteDeltaTolerance => "absolute-delta",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(v: f64) -> Tolerance {
        Tolerance::new(v).unwrap()
    }

    #[test]
    fn test_signed_delta_is_one_sided() {
        let rule = ComparisonRule::SignedDelta;
        assert!(rule.accepts(5.0, 5.0 + 2e-12, t(1e-12)));
        assert!(!rule.accepts(5.0 + 2e-12, 5.0, t(1e-12)));
        assert!(rule.accepts(0.0, 1000.0, t(0.0)));
    }

    #[test]
    fn test_absolute_delta_is_symmetric() {
        let rule = ComparisonRule::AbsoluteDeltaTolerance;
        assert!(!rule.accepts(5.0, 5.0 + 2e-12, t(1e-12)));
        assert!(!rule.accepts(5.0 + 2e-12, 5.0, t(1e-12)));
        assert!(rule.accepts(1.0, 1.4, t(0.5)));
    }

    #[test]
    fn test_truncated_rule_floors_tolerance() {
        let rule = ComparisonRule::AbsoluteDeltaTruncatedTolerance;
        assert_eq!(rule.effective_tolerance(t(1e-12)), 0.0);
        assert!(!rule.accepts(3.0, 3.0 + 1e-13, t(0.9)));
        assert!(rule.accepts(3.0, 4.0, t(1.5)));
        assert!(!rule.accepts(3.0, 5.0, t(1.5)));
    }

    #[test]
    fn test_identical_values_always_accepted() {
        for rule in [
            ComparisonRule::SignedDelta,
            ComparisonRule::AbsoluteDeltaTruncatedTolerance,
            ComparisonRule::AbsoluteDeltaTolerance,
        ] {
            assert!(rule.accepts(f64::NAN, f64::NAN, t(0.0)));
            assert!(rule.accepts(f64::INFINITY, f64::INFINITY, t(0.0)));
            assert!(rule.accepts(-0.0, 0.0, t(0.0)));
        }
    }
}
