//! Comparison policy: which rule each stage applies, and run options
//!
//! The rule mapping is data, not code: each comparator asks the `RuleSet`
//! for the rule of its stage. Changing how a stage compares values means
//! changing one field here.

use crate::model::Tolerance;
use crate::rules::ComparisonRule;
use serde::{Deserialize, Serialize};

/// Default cap on elements held by one compared unit
pub const DEFAULT_MAX_ELEMENTS: usize = 200_000_000;

/// Rule applied by each comparison stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// Unstructured-grid point data
    pub point_data: ComparisonRule,
    /// Structured-grid topology connectivity
    pub connectivity: ComparisonRule,
    /// Structured-grid node coordinates
    pub geometry: ComparisonRule,
    /// Structured-grid attribute values
    pub attributes: ComparisonRule,
}

impl RuleSet {
    /// The mapping regression baselines were produced with
    pub const REFERENCE: RuleSet = RuleSet {
        point_data: ComparisonRule::SignedDelta,
        connectivity: ComparisonRule::AbsoluteDeltaTruncatedTolerance,
        geometry: ComparisonRule::AbsoluteDeltaTolerance,
        attributes: ComparisonRule::AbsoluteDeltaTolerance,
    };

    /// Every stage uses the same rule
    pub fn uniform(rule: ComparisonRule) -> Self {
        Self {
            point_data: rule,
            connectivity: rule,
            geometry: rule,
            attributes: rule,
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::REFERENCE
    }
}

/// Options for one comparison run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompareOptions {
    pub tolerance: Tolerance,
    pub rules: RuleSet,
    /// Largest element count accepted for one unit; `None` disables the cap
    pub max_elements: Option<usize>,
}

impl CompareOptions {
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn with_max_elements(mut self, max_elements: Option<usize>) -> Self {
        self.max_elements = max_elements;
        self
    }
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::DEFAULT,
            rules: RuleSet::REFERENCE,
            max_elements: Some(DEFAULT_MAX_ELEMENTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_rule_mapping() {
        let rules = RuleSet::default();
        assert_eq!(rules.point_data, ComparisonRule::SignedDelta);
        assert_eq!(
            rules.connectivity,
            ComparisonRule::AbsoluteDeltaTruncatedTolerance
        );
        assert_eq!(rules.geometry, ComparisonRule::AbsoluteDeltaTolerance);
        assert_eq!(rules.attributes, ComparisonRule::AbsoluteDeltaTolerance);
    }

    #[test]
    fn test_uniform() {
        let rules = RuleSet::uniform(ComparisonRule::AbsoluteDeltaTolerance);
        assert_eq!(rules.point_data, ComparisonRule::AbsoluteDeltaTolerance);
        assert_eq!(rules.connectivity, ComparisonRule::AbsoluteDeltaTolerance);
    }

    #[test]
    fn test_default_options() {
        let options = CompareOptions::default();
        assert_eq!(options.tolerance, Tolerance::DEFAULT);
        assert_eq!(options.max_elements, Some(DEFAULT_MAX_ELEMENTS));
        assert_eq!(options.with_max_elements(None).max_elements, None);
    }
}
