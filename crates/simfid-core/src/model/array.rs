use serde::{Deserialize, Serialize};

/// A named numeric field attached to the points of a mesh
///
/// `values` is the flat, tuple-major sequence exactly as the file stores it:
/// for a 3-component array, elements `3*i..3*i+3` belong to point `i`.
/// Arrays keep the file's native order; nothing sorts or normalizes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedNumericArray {
    pub name: String,
    pub components: usize,
    pub values: Vec<f64>,
}

impl NamedNumericArray {
    /// Create a single-component array
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            components: 1,
            values,
        }
    }

    /// Set the tuple width
    pub fn with_components(mut self, components: usize) -> Self {
        self.components = components.max(1);
        self
    }

    /// Total element count (tuples times components)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of complete tuples
    pub fn tuple_count(&self) -> usize {
        self.values.len() / self.components.max(1)
    }

    /// Append another array's values (used when merging partitions)
    pub fn extend_from(&mut self, other: &NamedNumericArray) {
        self.values.extend_from_slice(&other.values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tuple_count_uses_components() {
        let velocity =
            NamedNumericArray::new("velocity", vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).with_components(3);
        assert_eq!(velocity.len(), 6);
        assert_eq!(velocity.tuple_count(), 2);
    }

    #[test]
    fn test_zero_components_is_clamped() {
        let arr = NamedNumericArray::new("p", vec![1.0]).with_components(0);
        assert_eq!(arr.components, 1);
        assert_eq!(arr.tuple_count(), 1);
    }

    #[test]
    fn test_extend_from_appends_in_order() {
        let mut first = NamedNumericArray::new("p", vec![1.0, 2.0]);
        first.extend_from(&NamedNumericArray::new("p", vec![3.0]));
        assert_eq!(first.values, vec![1.0, 2.0, 3.0]);
    }
}
