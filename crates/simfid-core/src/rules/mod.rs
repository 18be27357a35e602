//! Numeric acceptance rules and resource limits applied by the comparators.

pub mod comparison_rule;
pub mod limits;

pub use comparison_rule::ComparisonRule;
pub use limits::check_element_limit;
