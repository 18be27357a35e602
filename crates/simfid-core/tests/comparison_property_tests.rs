mod common;

use common::{attribute, hdf, triangle_mesh, triangle_payloads};
use proptest::prelude::*;
use simfid_core::{
    compare_descriptions, compare_point_data, CompareOptions, ComparisonRule, NamedNumericArray,
    Tolerance,
};

fn opts(tolerance: f64) -> CompareOptions {
    CompareOptions::default().with_tolerance(Tolerance::new(tolerance).unwrap())
}

fn arrays(values: &[Vec<f64>]) -> Vec<NamedNumericArray> {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| NamedNumericArray::new(format!("field_{}", i), v.clone()))
        .collect()
}

proptest! {
    #[test]
    fn prop_point_data_matches_itself(
        values in prop::collection::vec(prop::collection::vec(any::<f64>(), 0..16), 0..4),
        tolerance in 0.0f64..10.0,
    ) {
        let a = arrays(&values);
        prop_assert!(compare_point_data(&a, &a, &opts(tolerance)).is_ok());
    }

    #[test]
    fn prop_description_matches_itself(
        energy in prop::collection::vec(-1e6f64..1e6, 1..32),
        tolerance in 0.0f64..10.0,
    ) {
        let desc = triangle_mesh("a.xmf", vec![attribute("Scalar", "energy", hdf("/e"))]);
        let payloads = triangle_payloads().with_values("/e", &energy);
        prop_assert!(
            compare_descriptions(&desc, &desc, &opts(tolerance), &payloads, &payloads).is_ok()
        );
    }

    #[test]
    fn prop_point_data_tolerance_monotone(
        first in prop::collection::vec(-1e3f64..1e3, 1..16),
        noise in prop::collection::vec(-1.0f64..1.0, 16),
        low in 0.0f64..1.0,
        extra in 0.0f64..1.0,
    ) {
        let second: Vec<f64> = first.iter().zip(&noise).map(|(a, n)| a + n).collect();
        let a = vec![NamedNumericArray::new("p", first)];
        let b = vec![NamedNumericArray::new("p", second)];

        let at_low = compare_point_data(&a, &b, &opts(low)).is_ok();
        let at_high = compare_point_data(&a, &b, &opts(low + extra)).is_ok();
        prop_assert!(!at_low || at_high);
    }

    #[test]
    fn prop_rules_tolerance_monotone(
        first in -1e3f64..1e3,
        second in -1e3f64..1e3,
        low in 0.0f64..5.0,
        extra in 0.0f64..5.0,
    ) {
        for rule in [
            ComparisonRule::SignedDelta,
            ComparisonRule::AbsoluteDeltaTruncatedTolerance,
            ComparisonRule::AbsoluteDeltaTolerance,
        ] {
            let low_t = Tolerance::new(low).unwrap();
            let high_t = Tolerance::new(low + extra).unwrap();
            if rule.accepts(first, second, low_t) {
                prop_assert!(rule.accepts(first, second, high_t), "{} not monotone", rule);
            }
        }
    }
}
